use std::str::FromStr;
use std::sync::Arc;

use bookland::{
    calendar,
    domain::{
        AdmissionSubmission, CreateAlumniMessageRequest, CreateDeadlineRequest, CreateEventRequest,
        CreateFeaturedEventRequest, CreateGalleryImageRequest, CreateLeadershipMessageRequest,
        CreateTestimonialRequest, DeadlineName, EnquirySubmission, EventCategory, FeeAmounts,
        FeeStructureInput, SchoolLevel,
    },
    error::AppError,
    service::ServiceContext,
    storage::PublicUrlResolver,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use clap::Parser;
use fake::{
    faker::{
        internet::en::SafeEmail,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
        phone_number::en::PhoneNumber,
    },
    Fake,
};
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;

#[derive(Parser, Debug)]
#[command(about = "Populate a Bookland database with sample website content")]
struct Args {
    /// SQLite database to seed
    #[arg(long, default_value = "sqlite://bookland.db?mode=rwc")]
    database_url: String,

    /// Number of fake admission requests and enquiries to add
    #[arg(long, default_value_t = 5)]
    messages: usize,
}

fn time(h: u32, m: u32) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| anyhow::anyhow!("invalid time {}:{}", h, m))
}

fn amount(value: &str) -> anyhow::Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("🌱 Starting database seeding...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let resolver = Arc::new(PublicUrlResolver::new("http://localhost:8080/media".to_string()));
    let ctx = ServiceContext::from_pool(db_pool, resolver);
    let today = calendar::today();

    // Catalog content
    println!("📚 Creating catalog content...");
    for (name, title) in [("Grace Wanjiku", "Parent, Grade 4"), ("Peter Otieno", "Parent, PP2"), ("Mercy Achieng", "Parent, Junior Secondary")] {
        ctx.catalog_service
            .create_testimonial(CreateTestimonialRequest {
                name: name.to_string(),
                title: title.to_string(),
                testimonial: Paragraph(1..3).fake(),
                image: None,
            })
            .await?;
    }

    for (salutation, name, designation) in [("Mrs.", "Jane Mwangi", "Director"), ("Mr.", "David Kamau", "Head Teacher")] {
        ctx.catalog_service
            .create_leadership_message(CreateLeadershipMessageRequest {
                salutation: salutation.to_string(),
                name: name.to_string(),
                designation: designation.to_string(),
                message: Paragraph(2..4).fake(),
                image: Some(format!("leadership/{}.jpg", name.to_lowercase().replace(' ', "-"))),
            })
            .await?;
    }

    for offset in 0..3 {
        ctx.catalog_service
            .create_alumni_message(
                CreateAlumniMessageRequest {
                    name: Name().fake(),
                    title: Sentence(2..4).fake(),
                    year_of_completion: Some(today.year() - 2 - offset),
                    message: Paragraph(1..2).fake(),
                    image: None,
                },
                today,
            )
            .await?;
    }

    for (i, title) in ["Sports Day", "Science Fair", "Music Festival", ""].into_iter().enumerate() {
        ctx.catalog_service
            .create_gallery_image(CreateGalleryImageRequest {
                title: title.to_string(),
                image: Some(format!("gallery/photo-{}.jpg", i + 1)),
            })
            .await?;
    }

    let festival_start = today + Duration::days(21);
    ctx.catalog_service
        .create_featured_event(CreateFeaturedEventRequest {
            title: "Annual Music Festival".to_string(),
            start_date: festival_start,
            end_date: Some(festival_start + Duration::days(2)),
            image: Some("featured/music-festival.jpg".to_string()),
            description: Paragraph(1..2).fake(),
        })
        .await?;
    ctx.catalog_service
        .create_featured_event(CreateFeaturedEventRequest {
            title: "Open Day".to_string(),
            start_date: today + Duration::days(45),
            end_date: None,
            image: None,
            description: Paragraph(1..2).fake(),
        })
        .await?;

    println!("  ✅ Created catalog content");

    // Events spread over the coming months
    println!("📅 Creating events...");
    let mut created_events = 0;
    for (i, category) in EventCategory::ALL.into_iter().enumerate() {
        let date = today + Duration::days(10 + 17 * i as i64);
        ctx.event_service
            .create(CreateEventRequest {
                title: format!("{} {}", category, Sentence(1..3).fake::<String>().trim_end_matches('.')),
                category,
                year: date.year(),
                month: date.month(),
                day: date.day(),
                start_time: time(9, 0)?,
                end_time: time(13, 30)?,
                location: "Main Hall".to_string(),
                description: Paragraph(1..2).fake(),
            })
            .await?;
        created_events += 1;
    }
    println!("  ✅ Created {} events", created_events);

    // Fees
    println!("💰 Creating fee structures...");
    let fee_table = [
        (SchoolLevel::PlayGroup, "15000.00", "4000.00", "3500.00"),
        (SchoolLevel::PrePrimary, "17500.00", "4000.00", "3500.00"),
        (SchoolLevel::LowerPrimary, "21000.00", "4500.00", "4000.00"),
        (SchoolLevel::UpperPrimary, "24500.00", "4500.00", "4000.00"),
        (SchoolLevel::JuniorSecondary, "29000.00", "5000.00", "4500.00"),
    ];
    for (level, tuition, meals, transport) in fee_table {
        let fee = ctx
            .fee_service
            .upsert(FeeStructureInput {
                level,
                amounts: FeeAmounts {
                    tuition_per_term: amount(tuition)?,
                    meals_fee: amount(meals)?,
                    transport_fee: amount(transport)?,
                },
                file: Some(format!("fee_structures/{}.pdf", level.as_str().to_lowercase().replace(' ', ""))),
            })
            .await?;
        println!("  ✅ {}: total {}", fee.level, fee.total_fee);
    }

    // Deadlines: one per period, skipped when already present
    println!("🗓️  Creating admission deadlines...");
    let year = today.year();
    let deadlines = [
        (DeadlineName::TermOne, (year + 1, 1, 5)),
        (DeadlineName::MidTermOne, (year + 1, 2, 20)),
        (DeadlineName::TermTwo, (year + 1, 4, 28)),
        (DeadlineName::MidTermTwo, (year + 1, 6, 25)),
        (DeadlineName::TermThree, (year + 1, 8, 26)),
    ];
    for (name, (y, m, d)) in deadlines {
        let deadline_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| anyhow::anyhow!("invalid deadline date {}-{}-{}", y, m, d))?;
        match ctx
            .catalog_service
            .create_deadline(CreateDeadlineRequest { name, deadline_date })
            .await
        {
            Ok(_) => println!("  ✅ {} closes {}", name, deadline_date),
            Err(AppError::Conflict(_)) => println!("  ⏭️  {} already set", name),
            Err(e) => return Err(e.into()),
        }
    }

    // Intake messages
    println!("✉️  Creating {} admission requests and enquiries...", args.messages);
    for _ in 0..args.messages {
        ctx.intake_service
            .submit_admission(AdmissionSubmission {
                name: Some(Name().fake()),
                email: Some(SafeEmail().fake()),
                phone: Some(PhoneNumber().fake::<String>().chars().take(20).collect()),
                message: Some(Sentence(5..12).fake()),
            })
            .await?;
        ctx.intake_service
            .submit_enquiry(EnquirySubmission {
                name: Some(Name().fake()),
                email: Some(SafeEmail().fake()),
                subject: Some(Sentence(2..5).fake()),
                message: Some(Sentence(5..12).fake()),
            })
            .await?;
    }

    println!("\n✨ Database seeding complete!");
    println!("   Admission requests: {}", ctx.intake_service.count_admissions().await?);
    println!("   Enquiries: {}", ctx.intake_service.count_enquiries().await?);

    Ok(())
}
