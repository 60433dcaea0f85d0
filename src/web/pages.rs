use askama::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{
            content::{
                AlumniResponse, FeaturedEventResponse, GalleryImageResponse, LeadershipResponse,
                TestimonialResponse,
            },
            events::EventResponse,
            fees::FeeResponse,
        },
        state::AppState,
    },
    calendar::{self, CalendarView},
    domain::{EventCategory, MONTH_NAMES},
    error::Result,
    web::templates::HtmlTemplate,
};

// =============================================================================
// Home and about
// =============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub testimonials: Vec<TestimonialResponse>,
    pub leadership: Vec<LeadershipResponse>,
    pub featured_events: Vec<FeaturedEventResponse>,
    pub gallery: Vec<GalleryImageResponse>,
}

pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let files = ctx.file_resolver.as_ref();
    let catalog = &ctx.catalog_service;

    let (testimonials, leadership, featured_events, gallery) = tokio::join!(
        catalog.list_testimonials(),
        catalog.list_leadership(),
        catalog.list_featured_events(),
        catalog.list_gallery(),
    );

    Ok(HtmlTemplate(IndexTemplate {
        testimonials: testimonials?.into_iter().map(|t| TestimonialResponse::new(t, files)).collect(),
        leadership: leadership?.into_iter().map(|l| LeadershipResponse::new(l, files)).collect(),
        featured_events: featured_events?
            .into_iter()
            .map(|f| FeaturedEventResponse::new(f, files))
            .collect(),
        gallery: gallery?.into_iter().map(|g| GalleryImageResponse::new(g, files)).collect(),
    }))
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub leadership: Vec<LeadershipResponse>,
}

pub async fn about(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let leadership = ctx.catalog_service.list_leadership().await?;
    Ok(HtmlTemplate(AboutTemplate {
        leadership: leadership
            .into_iter()
            .map(|l| LeadershipResponse::new(l, ctx.file_resolver.as_ref()))
            .collect(),
    }))
}

#[derive(Template)]
#[template(path = "alumni.html")]
pub struct AlumniTemplate {
    pub alumni: Vec<AlumniResponse>,
}

pub async fn alumni(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let alumni = ctx.catalog_service.list_alumni().await?;
    Ok(HtmlTemplate(AlumniTemplate {
        alumni: alumni
            .into_iter()
            .map(|a| AlumniResponse::new(a, ctx.file_resolver.as_ref()))
            .collect(),
    }))
}

#[derive(Template)]
#[template(path = "fees.html")]
pub struct FeesTemplate {
    pub fees: Vec<FeeResponse>,
}

pub async fn fees(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let ctx = &state.service_context;
    let fees = ctx.fee_service.list().await?;
    Ok(HtmlTemplate(FeesTemplate {
        fees: fees
            .into_iter()
            .map(|fee| FeeResponse::new(fee, ctx.file_resolver.as_ref()))
            .collect(),
    }))
}

// =============================================================================
// FAQs
// =============================================================================

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

static FAQS: [Faq; 5] = [
    Faq {
        question: "When does the admission window open?",
        answer: "Admissions run throughout the year. Each term's closing date is listed on the admissions page.",
    },
    Faq {
        question: "Which levels does the school offer?",
        answer: "Play Group, PP1 - PP2, Grade 1 - 6 and Junior Secondary.",
    },
    Faq {
        question: "Are meals and transport included in tuition?",
        answer: "No. Meals and transport are billed per term alongside tuition; the fees page shows the total for each level.",
    },
    Faq {
        question: "Can we visit the school before applying?",
        answer: "Yes. Send us a message through the contact page and the admissions office will arrange a visit.",
    },
    Faq {
        question: "How do I follow school events?",
        answer: "The events page lists every upcoming activity by month and category.",
    },
];

#[derive(Template)]
#[template(path = "faqs.html")]
pub struct FaqsTemplate {
    pub faqs: &'static [Faq],
}

pub async fn faqs() -> impl IntoResponse {
    HtmlTemplate(FaqsTemplate { faqs: &FAQS })
}

// =============================================================================
// Events calendar
// =============================================================================

/// `year`/`month` pick the calendar month; `event_month`/`category` filter the list.
#[derive(Debug, Default, Deserialize)]
pub struct EventsPageQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub event_month: Option<String>,
    pub category: Option<String>,
}

pub struct CalendarCell {
    pub day: u32,
    pub in_month: bool,
    pub has_events: bool,
}

pub struct FilterOption {
    pub value: &'static str,
    pub selected: bool,
}

fn filter_options(values: impl Iterator<Item = &'static str>, selected: Option<&str>) -> Vec<FilterOption> {
    values
        .map(|value| FilterOption { value, selected: selected == Some(value) })
        .collect()
}

pub struct CategoryCount {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub month_name: &'static str,
    pub year: i32,
    pub weeks: Vec<Vec<CalendarCell>>,
    pub previous_year: i32,
    pub previous_month: u32,
    pub next_year: i32,
    pub next_month: u32,
    pub upcoming: Vec<CategoryCount>,
    pub events: Vec<EventResponse>,
    pub months: Vec<FilterOption>,
    pub categories: Vec<FilterOption>,
}

impl EventsTemplate {
    fn new(view: CalendarView, events: Vec<EventResponse>, query: EventsPageQuery) -> Self {
        let weeks = view
            .weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|d| CalendarCell {
                        day: d.day,
                        in_month: d.in_month,
                        has_events: d.in_month && view.event_days.contains(&d.day),
                    })
                    .collect()
            })
            .collect();

        Self {
            month_name: view.month_name,
            year: view.current.year,
            weeks,
            previous_year: view.previous.year,
            previous_month: view.previous.month,
            next_year: view.next.year,
            next_month: view.next.month,
            upcoming: view
                .upcoming_counts
                .iter()
                .map(|(category, count)| CategoryCount { name: category.as_str(), count: *count })
                .collect(),
            events,
            months: filter_options(MONTH_NAMES.into_iter(), query.event_month.as_deref()),
            categories: filter_options(
                EventCategory::ALL.iter().map(|c| c.as_str()),
                query.category.as_deref(),
            ),
        }
    }
}

pub async fn events(
    State(state): State<AppState>,
    Query(query): Query<EventsPageQuery>,
) -> Result<impl IntoResponse> {
    let service = &state.service_context.event_service;
    let view = service
        .calendar(query.year.as_deref(), query.month.as_deref(), calendar::today())
        .await?;
    let events = service
        .list(query.event_month.as_deref(), query.category.as_deref())
        .await?;

    Ok(HtmlTemplate(EventsTemplate::new(
        view,
        events.into_iter().map(EventResponse::from).collect(),
        query,
    )))
}
