use std::sync::Arc;

use bookland::{
    domain::{
        CreateAlumniMessageRequest, CreateEventRequest, CreateFeaturedEventRequest, EventCategory,
        FeeAmounts, FeeStructureInput, SchoolLevel,
    },
    error::AppError,
    service::ServiceContext,
    storage::PublicUrlResolver,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_context() -> anyhow::Result<ServiceContext> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let resolver = Arc::new(PublicUrlResolver::new("https://cdn.example.com".to_string()));
    Ok(ServiceContext::from_pool(pool, resolver))
}

fn alumni_request(year: Option<i32>) -> CreateAlumniMessageRequest {
    CreateAlumniMessageRequest {
        name: "Brian Mutua".to_string(),
        title: "Software Engineer".to_string(),
        year_of_completion: year,
        message: "Bookland taught me to love maths.".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn test_alumni_year_defaults_to_current_year() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let alumnus = ctx.catalog_service.create_alumni_message(alumni_request(None), today).await?;
    assert_eq!(alumnus.year_of_completion, 2026);

    let too_early = ctx.catalog_service.create_alumni_message(alumni_request(Some(2013)), today).await;
    assert!(matches!(too_early, Err(AppError::Validation(_))));

    let future = ctx.catalog_service.create_alumni_message(alumni_request(Some(2027)), today).await;
    assert!(matches!(future, Err(AppError::Validation(_))));

    assert_eq!(ctx.catalog_service.list_alumni().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_featured_event_end_must_not_precede_start() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let result = ctx.catalog_service.create_featured_event(CreateFeaturedEventRequest {
        title: "Open Day".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 5, 9),
        image: None,
        description: String::new(),
    }).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(ctx.catalog_service.list_featured_events().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_event_requires_a_real_date() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let result = ctx.event_service.create(CreateEventRequest {
        title: "Leap Day Run".to_string(),
        category: EventCategory::Sports,
        year: 2025,
        month: 2,
        day: 29,
        start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        location: "Track".to_string(),
        description: String::new(),
    }).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_upcoming_counts_use_calendar_order() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
    for (category, year, month, day) in [
        (EventCategory::Sports, 2024, 6, 20),
        (EventCategory::Sports, 2024, 6, 10),
        (EventCategory::Arts, 2024, 11, 1),
        (EventCategory::Arts, 2025, 1, 1),
    ] {
        ctx.event_service.create(CreateEventRequest {
            title: format!("{} event", category),
            category,
            year,
            month,
            day,
            start_time: at(8),
            end_time: at(10),
            location: "Grounds".to_string(),
            description: String::new(),
        }).await?;
    }

    let counts = ctx.event_service
        .upcoming_counts(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .await?;
    assert_eq!(counts.get(&EventCategory::Sports), Some(&1));
    assert_eq!(counts.get(&EventCategory::Arts), Some(&2));
    assert_eq!(counts.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_fee_validation_and_duplicate_levels() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let input = |tuition: Decimal| FeeStructureInput {
        level: SchoolLevel::PrePrimary,
        amounts: FeeAmounts {
            tuition_per_term: tuition,
            meals_fee: Decimal::ZERO,
            transport_fee: Decimal::ZERO,
        },
        file: None,
    };

    let negative = ctx.fee_service.create(input(Decimal::new(-100, 0))).await;
    assert!(matches!(negative, Err(AppError::Validation(_))));

    let fee = ctx.fee_service.create(input(Decimal::new(17500, 0))).await?;
    let duplicate = ctx.fee_service.create(input(Decimal::new(18000, 0))).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let replaced = ctx.fee_service.upsert(input(Decimal::new(18000, 0))).await?;
    assert_eq!(replaced.id, fee.id);
    assert_eq!(replaced.total_fee, Decimal::new(18000, 0));

    let stored = ctx.fee_service.get_by_level(SchoolLevel::PrePrimary).await?;
    assert_eq!(stored.map(|f| f.total_fee), Some(Decimal::new(18000, 0)));
    assert!(ctx.fee_service.get_by_level(SchoolLevel::PlayGroup).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_fee_total_over_ten_digits_is_rejected() -> anyhow::Result<()> {
    let ctx = test_context().await?;
    let largest = Decimal::new(9_999_999_999, 2);
    let result = ctx.fee_service.create(FeeStructureInput {
        level: SchoolLevel::JuniorSecondary,
        amounts: FeeAmounts {
            tuition_per_term: largest,
            meals_fee: largest,
            transport_fee: largest,
        },
        file: None,
    }).await;

    match result {
        Err(AppError::Validation(errors)) => assert!(errors.contains_key("total_fee")),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(ctx.fee_service.get_by_level(SchoolLevel::JuniorSecondary).await?.is_none());
    Ok(())
}
