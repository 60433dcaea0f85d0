use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bookland::{
    api::{self, middleware::throttle::{limiter, Throttles}, state::AppState},
    config::{Settings, ThrottleRate},
    domain::{CreateEventRequest, EventCategory, FeeAmounts, FeeStructureInput, SchoolLevel},
    repository::AdmissionRepository,
    service::ServiceContext,
    storage::{PublicUrlResolver, SignedUrlResolver},
};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_context() -> anyhow::Result<Arc<ServiceContext>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let resolver = Arc::new(PublicUrlResolver::new("https://cdn.example.com/media".to_string()));
    Ok(Arc::new(ServiceContext::from_pool(pool, resolver)))
}

fn app(ctx: Arc<ServiceContext>, throttles: Throttles) -> Router {
    api::create_app(AppState::new(ctx, Arc::new(Settings::default()), throttles))
}

async fn get_json(app: Router, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

async fn post_json(app: Router, uri: &str, payload: Value) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
async fn test_api_root_reports_running() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = get_json(app(ctx, Throttles::default()), "/api/").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Bookland Schools API");
    assert_eq!(body["status"], "running");
    assert!(body["date"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_admission_missing_email_is_rejected_without_a_row() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/admissions/submit/",
        json!({ "name": "Jane Doe", "message": "Grade 4 place" }),
    ).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
    assert_eq!(ctx.admission_repo.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_admission_with_required_fields_creates_one_row() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/admissions/submit/",
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "0712345678",
            "message": "Grade 4 place for 2025"
        }),
    ).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], "Admission request submitted successfully.");
    assert_eq!(ctx.admission_repo.count().await?, 1);
    Ok(())
}

async fn post_form(app: Router, uri: &str, body: &'static str) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
async fn test_admission_accepts_numeric_phone() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, _) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/admissions/submit/",
        json!({ "name": "Jane", "email": "jane@example.com", "phone": 712345678, "message": "hi" }),
    ).await?;

    assert_eq!(status, StatusCode::CREATED);
    let stored = ctx.admission_repo.list(10, 0).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].phone.as_deref(), Some("712345678"));
    Ok(())
}

#[tokio::test]
async fn test_wrongly_typed_fields_get_field_errors() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/admissions/submit/",
        json!({ "name": "Jane", "email": null, "message": 42 }),
    ).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"][0], "This field is required.");
    assert!(body["errors"].get("message").is_none());

    let (status, body) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/contact/submit/",
        json!({ "name": "Sam", "message": true, "subject": ["a"] }),
    ).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["message"][0], "Not a valid string.");
    assert_eq!(body["errors"]["subject"][0], "Not a valid string.");
    assert_eq!(body["errors"]["email"][0], "This field is required.");
    assert_eq!(ctx.admission_repo.count().await?, 0);
    assert_eq!(ctx.intake_service.count_enquiries().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_contact_accepts_urlencoded_body() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_form(
        app(ctx.clone(), Throttles::default()),
        "/api/contact/submit/",
        "name=Jane&email=jane%40example.com&message=hi",
    ).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], "Your message has been sent successfully.");
    assert_eq!(ctx.intake_service.count_enquiries().await?, 1);

    let (status, body) = post_form(
        app(ctx.clone(), Throttles::default()),
        "/api/contact/submit/",
        "name=Jane&message=hi",
    ).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_submission_body_must_be_an_object() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_json(
        app(ctx, Throttles::default()),
        "/api/admissions/submit/",
        json!(["Jane"]),
    ).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["non_field_errors"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_contact_rejects_malformed_email() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = post_json(
        app(ctx.clone(), Throttles::default()),
        "/api/contact/submit/",
        json!({ "name": "Amina", "email": "not-an-email", "message": "Transport routes?" }),
    ).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"][0], "Enter a valid email address.");
    assert_eq!(ctx.intake_service.count_enquiries().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_events_filter_by_month_name_and_category() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
    for (title, category, month) in [
        ("Maths Contest", EventCategory::Academic, 3),
        ("Drama Night", EventCategory::Arts, 3),
        ("Science Fair", EventCategory::Academic, 11),
    ] {
        ctx.event_service.create(CreateEventRequest {
            title: title.to_string(),
            category,
            year: 2024,
            month,
            day: 14,
            start_time: at(9),
            end_time: at(15),
            location: "Main Hall".to_string(),
            description: String::new(),
        }).await?;
    }

    let (status, body) = get_json(
        app(ctx.clone(), Throttles::default()),
        "/api/events/?month=March&category=Academic",
    ).await?;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Maths Contest");
    assert_eq!(events[0]["month"], "March");
    assert_eq!(events[0]["start_time"], "09:00 AM");
    assert_eq!(events[0]["end_time"], "03:00 PM");

    let (_, body) = get_json(app(ctx.clone(), Throttles::default()), "/api/events/").await?;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = get_json(app(ctx, Throttles::default()), "/api/events/?month=Smarch").await?;
    assert!(body.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_fees_serialize_two_decimal_strings_and_urls() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    ctx.fee_service.create(FeeStructureInput {
        level: SchoolLevel::PlayGroup,
        amounts: FeeAmounts {
            tuition_per_term: Decimal::new(15000, 0),
            meals_fee: Decimal::new(40005, 1),
            transport_fee: Decimal::ZERO,
        },
        file: Some("fee_structures/playgroup.pdf".to_string()),
    }).await?;

    let (status, body) = get_json(app(ctx, Throttles::default()), "/api/fees/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["level"], "Play Group");
    assert_eq!(body[0]["tuition_per_term"], "15000.00");
    assert_eq!(body[0]["meals_fee"], "4000.50");
    assert_eq!(body[0]["transport_fee"], "0.00");
    assert_eq!(body[0]["total_fee"], "19000.50");
    assert_eq!(body[0]["file"], "https://cdn.example.com/media/fee_structures/playgroup.pdf");
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_lists_are_empty_arrays() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    for uri in [
        "/api/testimonials/",
        "/api/leadership/",
        "/api/gallery/",
        "/api/featured-events/",
        "/api/alumni/",
        "/api/admission-deadlines/",
    ] {
        let (status, body) = get_json(app(ctx.clone(), Throttles::default()), uri).await?;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
    Ok(())
}

#[tokio::test]
async fn test_calendar_navigation_crosses_year_end() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let (status, body) = get_json(
        app(ctx, Throttles::default()),
        "/api/events/calendar/?year=2024&month=12",
    ).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month_name"], "December");
    assert_eq!(body["next"], json!({ "year": 2025, "month": 1 }));
    assert_eq!(body["previous"], json!({ "year": 2024, "month": 11 }));
    Ok(())
}

#[tokio::test]
async fn test_submissions_are_throttled() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let throttles = Throttles {
        anon: None,
        submissions: Some(limiter(ThrottleRate::parse("1/hour")?)),
    };
    let app = app(ctx, throttles);
    let payload = json!({ "name": "Amina", "email": "amina@example.com", "message": "Hello" });

    let (first, _) = post_json(app.clone(), "/api/contact/submit/", payload.clone()).await?;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = post_json(app, "/api/contact/submit/", payload).await?;
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_signed_media_keys_with_spaces_are_served() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("bookland-media-{}", std::process::id()));
    tokio::fs::create_dir_all(root.join("gallery")).await?;
    tokio::fs::write(root.join("gallery").join("sports day é.jpg"), b"jpeg").await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let resolver = Arc::new(SignedUrlResolver::new(
        "http://localhost/media".to_string(),
        "s3cret".to_string(),
        3600,
    ));
    let url = resolver.sign_at("gallery/sports day é.jpg", chrono::Utc::now().timestamp())?;
    let ctx = Arc::new(ServiceContext::from_pool(pool, resolver));

    let mut settings = Settings::default();
    settings.storage.media_root = Some(root.to_string_lossy().into_owned());
    let app = api::create_app(AppState::new(ctx, Arc::new(settings), Throttles::default()));

    let path = url.strip_prefix("http://localhost").unwrap();
    assert!(path.starts_with("/media/gallery/sports%20day%20%C3%A9.jpg?expires="));
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let unsigned = path.split('?').next().unwrap();
    let response = app
        .oneshot(Request::builder().uri(unsigned).body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}
