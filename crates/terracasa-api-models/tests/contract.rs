use serde_json::json;
use terracasa_api_models::{
    AuthResponse, ContactPartnerRequest, Country, CountryOverview, Envelope, ErrorBody,
    ListingStatus, PropertyDetail, PropertySummary, Review, ReviewRequest,
};

#[test]
fn auth_response_round_trips_through_envelope() -> anyhow::Result<()> {
    let body = json!({
        "data": {
            "token": "jwt-token",
            "user": {
                "id": "u1",
                "email": "ana@example.com",
                "firstName": "Ana",
                "language": "es",
                "role": "partner"
            }
        },
        "statusCode": 200
    });
    let envelope: Envelope<AuthResponse> = serde_json::from_value(body)?;
    assert_eq!(envelope.status_code, Some(200));
    let auth = envelope.data.ok_or_else(|| anyhow::anyhow!("missing data"))?;
    assert_eq!(auth.token, "jwt-token");
    assert_eq!(auth.user.language.as_deref(), Some("es"));
    assert_eq!(auth.user.display_name(), "Ana");
    assert_eq!(auth.user.last_name, None);
    Ok(())
}

#[test]
fn owner_listings_carry_moderation_status() -> anyhow::Result<()> {
    let items: Vec<PropertySummary> = serde_json::from_value(json!([
        { "id": "a", "title": "Loft", "country": "PT", "status": "pending_review" },
        { "id": "b", "title": "Finca", "country": "ES", "status": "published", "currency": "USD" }
    ]))?;
    assert_eq!(items[0].status, Some(ListingStatus::PendingReview));
    assert_eq!(items[0].currency, "EUR");
    assert_eq!(items[1].status, Some(ListingStatus::Published));
    assert_eq!(items[1].currency, "USD");
    Ok(())
}

#[test]
fn property_detail_flattens_card_fields() -> anyhow::Result<()> {
    let detail: PropertyDetail = serde_json::from_value(json!({
        "id": "p9",
        "title": "Townhouse",
        "country": "FR",
        "city": "Nice",
        "priceCents": 45_000_000,
        "imageUrls": ["a.jpg", "b.jpg"],
        "details": { "pool": "yes" }
    }))?;
    assert_eq!(detail.summary.id, "p9");
    assert_eq!(detail.summary.city.as_deref(), Some("Nice"));
    assert_eq!(detail.image_urls.len(), 2);
    assert!(detail.partner_id.is_none());
    Ok(())
}

#[test]
fn error_envelopes_expose_a_message() -> anyhow::Result<()> {
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_value(json!({ "message": "Property not found", "statusCode": 404 }))?;
    assert!(envelope.data.is_none());
    assert_eq!(envelope.message.as_deref(), Some("Property not found"));

    let body = ErrorBody::from_json(&json!({
        "error": "Validation failed",
        "errors": [{ "field": "price", "message": "must be positive" }]
    }));
    assert_eq!(body.display_message(), Some("Validation failed"));
    assert_eq!(body.errors[0].field, "price");
    Ok(())
}

#[test]
fn reviews_tolerate_sparse_records() -> anyhow::Result<()> {
    let reviews: Vec<Review> = serde_json::from_value(json!([
        { "id": "r1", "rating": 5, "comment": "Great help", "authorId": "u1", "authorName": "Ana" },
        { "id": "r2", "rating": 3 }
    ]))?;
    assert_eq!(reviews[0].author_id.as_deref(), Some("u1"));
    assert_eq!(reviews[1].comment, None);
    assert_eq!(reviews[1].author_name, None);

    let request = ReviewRequest {
        rating: 4,
        comment: "Responsive".to_string(),
    };
    assert_eq!(serde_json::to_value(&request)?, json!({ "rating": 4, "comment": "Responsive" }));
    Ok(())
}

#[test]
fn contact_request_omits_missing_phone() -> anyhow::Result<()> {
    let request = ContactPartnerRequest {
        name: "Jo".to_string(),
        email: "jo@example.com".to_string(),
        phone: None,
        message: "Is the villa still available?".to_string(),
    };
    let value = serde_json::to_value(&request)?;
    assert!(value.get("phone").is_none());
    assert_eq!(value["email"], "jo@example.com");
    Ok(())
}

#[test]
fn country_payloads_decode_with_defaults() -> anyhow::Result<()> {
    let countries: Vec<Country> =
        serde_json::from_value(json!([{ "code": "es", "name": "Spain" }, { "code": "PT", "name": "Portugal" }]))?;
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].code, "es");

    let overview: CountryOverview = serde_json::from_value(json!({
        "code": "ES",
        "name": "Spain",
        "languages": ["es", "ca"]
    }))?;
    assert_eq!(overview.capital, None);
    assert_eq!(overview.languages, vec!["es".to_string(), "ca".to_string()]);
    Ok(())
}
