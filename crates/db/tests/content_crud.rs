//! Integration tests for the taxonomy, event, and contact repositories.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use portfolio_core::search::PageRequest;
use portfolio_db::models::contact::{EnquiryFilter, NewEnquiry};
use portfolio_db::models::event::{EventFilter, EventRecord, NewEventMedia};
use portfolio_db::models::local_body::{LocalBodyInput, WardInput};
use portfolio_db::repositories::{
    CommunicationRepo, EnquiryRepo, EventRepo, GalleryRepo, LocalBodyRepo, WardRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn local_body(pool: &PgPool, name: &str) -> i64 {
    let input = LocalBodyInput {
        name: Some(name.to_string()),
        ..Default::default()
    };
    LocalBodyRepo::create(pool, &input).await.unwrap().id
}

fn ward(no: &str) -> WardInput {
    WardInput {
        ward_no: Some(no.to_string()),
        place_name: Some(format!("Place {no}")),
    }
}

fn event(name: &str, date: NaiveDate) -> EventRecord {
    EventRecord {
        event_name: name.to_string(),
        event_date: date,
        event_time: None,
        event_time_to: None,
        venue: "Town hall".to_string(),
        short_description: None,
        status: "upcoming".to_string(),
        event_type_id: None,
        local_body_id: None,
        sector_id: None,
    }
}

fn photo(event_id: i64, url: &str) -> NewEventMedia {
    NewEventMedia {
        event_id,
        media_type: "photo".to_string(),
        file_url: url.to_string(),
        caption: None,
        thumbnail_url: None,
        youtube_url: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Wards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_wards_sort_numerically(pool: PgPool) {
    let lb = local_body(&pool, "Kottayam").await;
    for no in ["10", "2", "1", "A"] {
        WardRepo::create(&pool, lb, &ward(no)).await.unwrap();
    }

    let wards = WardRepo::list_all(&pool, lb, None).await.unwrap();
    let numbers: Vec<_> = wards.iter().map(|w| w.ward_no.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "10", "A"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_ward_number_is_unique_violation(pool: PgPool) {
    let lb = local_body(&pool, "Pala").await;
    WardRepo::create(&pool, lb, &ward("3")).await.unwrap();

    let err = WardRepo::create(&pool, lb, &ward("3")).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db)
        if db.constraint() == Some("uq_local_body_wards_ward_no"));

    // Same number under another local body is fine.
    let other = local_body(&pool, "Vaikom").await;
    WardRepo::create(&pool, other, &ward("3")).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_ward_page_agrees_with_total(pool: PgPool) {
    let lb = local_body(&pool, "Ettumanoor").await;
    for no in 1..=7 {
        WardRepo::create(&pool, lb, &ward(&no.to_string())).await.unwrap();
    }

    let page = PageRequest::new(Some(2), Some(3), 6);
    let (rows, total) = WardRepo::list_page(&pool, lb, None, &page).await.unwrap();
    assert_eq!(total, 7);
    let numbers: Vec<_> = rows.iter().map(|w| w.ward_no.as_str()).collect();
    assert_eq!(numbers, vec!["4", "5", "6"]);
    assert_eq!(page.paginate(total).total_pages, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_ward_delete_is_scoped_to_local_body(pool: PgPool) {
    let lb = local_body(&pool, "Changanassery").await;
    let other = local_body(&pool, "Kumarakom").await;
    let w = WardRepo::create(&pool, lb, &ward("1")).await.unwrap();

    assert!(!WardRepo::delete(&pool, other, w.id).await.unwrap());
    assert!(WardRepo::delete(&pool, lb, w.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_event_delete_returns_media_and_cascades(pool: PgPool) {
    let e = EventRepo::create(&pool, &event("Camp", date(2025, 3, 1))).await.unwrap();
    EventRepo::add_media(&pool, &photo(e.id, "/uploads/events/a.jpg")).await.unwrap();
    EventRepo::add_media(&pool, &photo(e.id, "/uploads/events/b.jpg")).await.unwrap();
    EventRepo::replace_content(&pool, e.id, &[(1, "Intro".to_string())])
        .await
        .unwrap();

    let media = EventRepo::delete(&pool, e.id).await.unwrap().unwrap();
    let urls: Vec<_> = media.iter().map(|m| m.file_url.as_str()).collect();
    assert_eq!(urls, vec!["/uploads/events/a.jpg", "/uploads/events/b.jpg"]);

    assert!(EventRepo::list_media(&pool, e.id).await.unwrap().is_empty());
    assert!(EventRepo::list_content(&pool, e.id).await.unwrap().is_empty());
    assert!(EventRepo::delete(&pool, e.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_media_insert_waits_for_event_delete_lock(pool: PgPool) {
    let e = EventRepo::create(&pool, &event("Camp", date(2025, 3, 1))).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM events WHERE id = $1 FOR UPDATE")
        .bind(e.id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let late = tokio::spawn({
        let pool = pool.clone();
        async move { EventRepo::add_media(&pool, &photo(e.id, "/uploads/events/late.jpg")).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(!late.is_finished());

    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(e.id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(late.await.unwrap().is_err());
    assert!(EventRepo::list_media(&pool, e.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_content_swaps_all_paragraphs(pool: PgPool) {
    let e = EventRepo::create(&pool, &event("Rally", date(2025, 1, 5))).await.unwrap();
    EventRepo::replace_content(&pool, e.id, &[(1, "Old".to_string())])
        .await
        .unwrap();

    let content = EventRepo::replace_content(
        &pool,
        e.id,
        &[(2, "Second".to_string()), (1, "First".to_string())],
    )
    .await
    .unwrap()
    .unwrap();
    let texts: Vec<_> = content.iter().map(|p| p.paragraph_text.as_str()).collect();
    assert_eq!(texts, vec!["First", "Second"]);

    assert!(EventRepo::replace_content(&pool, 9999, &[]).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_event_list_filters_by_year_and_orders_newest_first(pool: PgPool) {
    EventRepo::create(&pool, &event("Old", date(2023, 6, 1))).await.unwrap();
    EventRepo::create(&pool, &event("Early", date(2024, 1, 1))).await.unwrap();
    EventRepo::create(&pool, &event("Late", date(2024, 12, 1))).await.unwrap();

    let filter = EventFilter {
        year: Some(2024),
        ..Default::default()
    };
    let (rows, total) = EventRepo::list(&pool, &filter, &PageRequest::new(None, None, 10))
        .await
        .unwrap();
    assert_eq!(total, 2);
    let names: Vec<_> = rows.iter().map(|e| e.event.event_name.as_str()).collect();
    assert_eq!(names, vec!["Late", "Early"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gallery_lists_only_requested_media_type(pool: PgPool) {
    let e = EventRepo::create(&pool, &event("Fair", date(2025, 2, 2))).await.unwrap();
    EventRepo::add_media(&pool, &photo(e.id, "/uploads/events/p.jpg")).await.unwrap();
    EventRepo::add_media(
        &pool,
        &NewEventMedia {
            media_type: "video".to_string(),
            ..photo(e.id, "/uploads/events/v.mp4")
        },
    )
    .await
    .unwrap();

    let photos = GalleryRepo::list(&pool, "photo", &EventFilter::default()).await.unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].event_name, "Fair");
    assert_eq!(photos[0].media.file_url, "/uploads/events/p.jpg");
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

fn enquiry(name: &str, panchayat_id: Option<i64>) -> NewEnquiry {
    NewEnquiry {
        full_name: name.to_string(),
        mobile: "9999999999".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        panchayat_id,
        category: "general".to_string(),
        subject: None,
        message: "Street lights are out".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enquiry_joins_panchayat_and_filters_status(pool: PgPool) {
    let lb = local_body(&pool, "Erattupetta").await;
    let id = EnquiryRepo::create(&pool, &enquiry("Asha", Some(lb))).await.unwrap();
    let other = EnquiryRepo::create(&pool, &enquiry("Binu", None)).await.unwrap();

    let found = EnquiryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(found.panchayat_name.as_deref(), Some("Erattupetta"));
    assert_eq!(found.status, "new");

    assert!(EnquiryRepo::update_status(&pool, other, "resolved").await.unwrap());
    let filter = EnquiryFilter {
        status: Some("resolved".to_string()),
        ..Default::default()
    };
    let (rows, total) = EnquiryRepo::list(&pool, &filter, &PageRequest::new(None, None, 15))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].full_name, "Binu");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_communications_cascade_with_enquiry(pool: PgPool) {
    let id = EnquiryRepo::create(&pool, &enquiry("Asha", None)).await.unwrap();
    CommunicationRepo::record(&pool, id, "sms", "+919999999999", Some("Hi"), "sent")
        .await
        .unwrap();
    CommunicationRepo::record(&pool, id, "voice", "+919999999999", None, "failed")
        .await
        .unwrap();

    let log = CommunicationRepo::list_for_enquiry(&pool, id).await.unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].channel, "voice");

    assert!(EnquiryRepo::delete(&pool, id).await.unwrap());
    assert!(CommunicationRepo::list_for_enquiry(&pool, id).await.unwrap().is_empty());
}
