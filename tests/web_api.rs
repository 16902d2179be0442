use async_trait::async_trait;
use job_matcher::llm::{OracleError, TextGenerator};
use job_matcher::{build_rocket, AppConfig, JobFitService};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use std::sync::Arc;

/// Answers every prompt with the same text
struct FixedReply(&'static str);

#[async_trait]
impl TextGenerator for FixedReply {
    async fn generate(&self, _prompt: &str) -> Result<String, OracleError> {
        Ok(self.0.to_string())
    }

    fn model_name(&self) -> &str {
        "fixed-test-model"
    }
}

const JOB_TEXT: &str = "Harbor Analytics is hiring a Backend Engineer to build ingestion services \
    in Rust. You will own data pipelines end to end and work closely with the platform team.";

const RESUME_TEXT: &str = "Jordan Park. Backend engineer, six years of Rust and Kafka pipelines.";

async fn client(reply: &'static str) -> Client {
    let config = AppConfig::default();
    let service = JobFitService::new(&config, Arc::new(FixedReply(reply))).unwrap();
    Client::tracked(build_rocket(service, &config)).await.unwrap()
}

#[rocket::async_test]
async fn health_reports_model() {
    let client = client("").await;
    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "fixed-test-model");
}

#[rocket::async_test]
async fn extracts_job_from_pasted_text() {
    let client = client(
        r#"```json
{"title": "Backend Engineer", "company": "Harbor Analytics", "summary": "Ingestion services",
 "expectations": ["Own pipelines", "Partner with platform"], "qualifications": "Rust"}
```"#,
    )
    .await;

    let response = client
        .post("/api/extract-job-from-text")
        .header(ContentType::JSON)
        .body(json!({ "text": JOB_TEXT }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["title"], "Backend Engineer");
    assert_eq!(body["expectations"], "Own pipelines\nPartner with platform");
    assert_eq!(body["fullJD"], JOB_TEXT);
}

#[rocket::async_test]
async fn rejects_non_http_job_link() {
    let client = client("").await;
    let response = client
        .post("/api/extract-job-from-link")
        .header(ContentType::JSON)
        .body(json!({ "jobLink": "ftp://jobs.example.com/42" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["type"], "error");
    assert_eq!(body["error_code"], "INVALID_INPUT");
}

#[rocket::async_test]
async fn analyze_match_returns_report_and_feedback() {
    let client = client(
        r#"{"score": 84, "strengths": ["Rust"], "gaps": ["No Airflow"],
            "suggestions": ["Quantify pipeline throughput"],
            "keywordMatches": {"matched": ["Rust", "Kafka", "Rust"], "missing": ["Airflow"]}}"#,
    )
    .await;

    let response = client
        .post("/api/analyze-match")
        .header(ContentType::JSON)
        .body(
            json!({
                "resumeText": RESUME_TEXT,
                "job": {
                    "title": "Backend Engineer",
                    "company": "Harbor Analytics",
                    "fullJD": JOB_TEXT
                }
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["matchScore"], 84);
    assert_eq!(body["jobTitle"], "Backend Engineer @ Harbor Analytics");
    assert_eq!(body["analysis"]["keywordMatches"]["matched"], json!(["Rust", "Kafka"]));

    let details: Value =
        serde_json::from_str(body["feedback"]["suggestions"].as_str().unwrap()).unwrap();
    assert_eq!(details["gaps"], json!(["No Airflow"]));
    assert_eq!(body["feedback"]["score"], 84);
}

#[rocket::async_test]
async fn analyze_match_requires_job_fields() {
    let client = client("{}").await;
    let response = client
        .post("/api/analyze-match")
        .header(ContentType::JSON)
        .body(
            json!({ "resumeText": RESUME_TEXT, "job": { "title": "Backend Engineer" } })
                .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error"], "Missing required job fields: company, fullJD");
}

#[rocket::async_test]
async fn malformed_model_reply_is_bad_gateway() {
    let client = client(
        r#"{"score": 70, "strengths": "not an array", "gaps": [], "suggestions": []}"#,
    )
    .await;
    let response = client
        .post("/api/analyze-match")
        .header(ContentType::JSON)
        .body(
            json!({
                "resumeText": RESUME_TEXT,
                "job": {
                    "title": "Backend Engineer",
                    "company": "Harbor Analytics",
                    "fullJD": JOB_TEXT
                }
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadGateway);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "MALFORMED_ORACLE_RESPONSE");
    assert_eq!(body["error"], "Failed to analyze resume-job match");
}

#[rocket::async_test]
async fn suggestions_are_filtered() {
    let client = client(r#"["Too short", "Lead each role with a measurable outcome"]"#).await;
    let response = client
        .post("/api/resume-suggestions")
        .header(ContentType::JSON)
        .body(json!({ "resumeText": RESUME_TEXT }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body["suggestions"],
        json!(["Lead each role with a measurable outcome"])
    );
}

#[rocket::async_test]
async fn upload_rejects_non_pdf() {
    let client = client("").await;
    let boundary = "X-JOBFIT-BOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\
         Content-Type: text/plain\r\n\r\nJordan Park, backend engineer\r\n--{b}--\r\n",
        b = boundary
    );

    let response = client
        .post("/api/upload-resume")
        .header(ContentType::new("multipart", "form-data").with_params(("boundary", boundary)))
        .body(body)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "INVALID_FORMAT");
}

#[rocket::async_test]
async fn preflight_gets_cors_headers() {
    let client = client("").await;
    let response = client.options("/api/analyze-match").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
}
