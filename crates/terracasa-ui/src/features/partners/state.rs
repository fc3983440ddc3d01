//! Partner profile state: reviews feed, review form and contact form.

use crate::core::config::REVIEWS_PAGE_SIZE;
use crate::core::logic::{FilterError, QueryParams, normalize_text};
use crate::core::search::{FilterForm, SearchController, SearchProfile, SearchQuery, SearchRequest};
use crate::core::validation::FieldErrors;
use terracasa_api_models::{ContactPartnerRequest, Review, ReviewRequest};

/// Partner whose reviews are listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewFeedForm {
    /// Partner identifier from the route.
    pub partner_id: String,
}

/// Normalized reviews query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Partner identifier.
    pub partner_id: String,
}

impl ReviewQuery {
    /// Collection path for this partner's reviews.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/partners/{}/reviews", urlencoding::encode(&self.partner_id))
    }

    /// [`Self::path`] for feed requests; `None` until a partner is chosen.
    #[must_use]
    pub fn feed_path(&self) -> Option<String> {
        (!self.partner_id.trim().is_empty()).then(|| self.path())
    }
}

impl FilterForm for ReviewFeedForm {
    type Query = ReviewQuery;

    fn normalize(&self) -> Result<ReviewQuery, FilterError> {
        normalize_text(&self.partner_id)
            .map(|partner_id| ReviewQuery { partner_id })
            .ok_or(FilterError::Required { field: "partnerId" })
    }
}

impl SearchQuery for ReviewQuery {
    fn to_params(&self) -> QueryParams {
        QueryParams::new()
    }
}

/// Reviews feed profile, ten per page.
///
/// The baseline names no partner; feeds are started through [`reviews_for`].
#[derive(Clone, Copy, Debug)]
pub struct ReviewFeed;

impl SearchProfile for ReviewFeed {
    type Form = ReviewFeedForm;
    type Query = ReviewQuery;
    type Item = Review;

    const NAME: &'static str = "reviews";
    const DEFAULT_PAGE_SIZE: u32 = REVIEWS_PAGE_SIZE;

    fn baseline() -> ReviewQuery {
        ReviewQuery::default()
    }
}

/// Controller for a partner's reviews.
pub type ReviewsState = SearchController<ReviewFeed>;

/// Reviews controller with its first page request for `partner_id`.
///
/// # Errors
/// Returns [`FilterError::Required`] for a blank id.
pub fn reviews_for(
    partner_id: &str,
) -> Result<(ReviewsState, SearchRequest<ReviewQuery>), FilterError> {
    let mut state = ReviewsState::new();
    let request = state.search_with(ReviewFeedForm {
        partner_id: partner_id.to_string(),
    })?;
    Ok((state, request))
}

/// Review editor inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewForm {
    /// Selected stars.
    pub rating: u8,
    /// Comment text.
    pub comment: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            rating: 5,
            comment: String::new(),
        }
    }
}

impl ReviewForm {
    /// Form holding an existing review for editing.
    #[must_use]
    pub fn editing(review: &Review) -> Self {
        Self {
            rating: review.rating.clamp(1, 5),
            comment: review.comment.clone().unwrap_or_default(),
        }
    }

    /// Validate into a request body.
    ///
    /// # Errors
    /// Returns per-field errors for a rating outside 1-5 or a blank comment.
    pub fn validate(&self) -> Result<ReviewRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !(1..=5).contains(&self.rating) {
            errors.insert("rating", "validation.rating");
        }
        errors.require("comment", &self.comment);
        errors.into_result()?;
        Ok(ReviewRequest {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        })
    }
}

/// Whether `review` was written by the signed-in user.
#[must_use]
pub fn is_own_review(review: &Review, user_id: Option<&str>) -> bool {
    match (review.author_id.as_deref(), user_id) {
        (Some(author), Some(user)) => !author.is_empty() && author == user,
        _ => false,
    }
}

/// Lead form sent to a partner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Reply-to email.
    pub email: String,
    /// Optional phone.
    pub phone: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// Form pre-filled from the signed-in user.
    #[must_use]
    pub fn prefilled(name: &str, email: &str, phone: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.unwrap_or_default().to_string(),
            message: String::new(),
        }
    }

    /// Validate into a request body.
    ///
    /// # Errors
    /// Returns per-field errors for missing name, message or a malformed email.
    pub fn validate(&self) -> Result<ContactPartnerRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name);
        errors.require_email("email", &self.email);
        errors.require("message", &self.message);
        errors.into_result()?;
        Ok(ContactPartnerRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: normalize_text(&self.phone),
            message: self.message.trim().to_string(),
        })
    }
}

/// Filled state of five stars for an average rating, rounded to whole stars.
#[must_use]
pub fn star_fill(rating: f64) -> [bool; 5] {
    let mut remaining = rating.clamp(0.0, 5.0).round();
    [(); 5].map(|()| {
        let filled = remaining >= 1.0;
        remaining -= 1.0;
        filled
    })
}

/// One-decimal rating label; `0.0` when unrated.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}")
    } else {
        "0.0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{INVALID_EMAIL, REQUIRED};

    #[test]
    fn review_feed_requires_partner_id() -> Result<(), FilterError> {
        assert!(reviews_for("  ").is_err());
        let (state, request) = reviews_for("p-42")?;
        assert_eq!(request.query.path(), "/partners/p-42/reviews");
        assert_eq!(
            request.params().to_query_string(),
            "page=1&itemsPerPage=10"
        );
        assert!(state.is_loading());
        Ok(())
    }

    #[test]
    fn baseline_feed_has_no_request_path() -> Result<(), FilterError> {
        let mut state = ReviewsState::new();
        assert_eq!(state.load_default().query.feed_path(), None);
        assert_eq!(state.reset().query.feed_path(), None);
        let (_, request) = reviews_for("p-42")?;
        assert_eq!(
            request.query.feed_path().as_deref(),
            Some("/partners/p-42/reviews")
        );
        Ok(())
    }

    #[test]
    fn review_form_checks_rating_and_comment() {
        let blank = ReviewForm::default().validate().err().unwrap_or_default();
        assert_eq!(blank.get("comment"), Some(REQUIRED));
        let zero = ReviewForm {
            rating: 0,
            comment: "Great".to_string(),
        };
        assert!(zero.validate().is_err());
        let ok = ReviewForm {
            rating: 4,
            comment: "  Very helpful notary ".to_string(),
        };
        assert_eq!(
            ok.validate(),
            Ok(ReviewRequest {
                rating: 4,
                comment: "Very helpful notary".to_string()
            })
        );
    }

    #[test]
    fn only_authors_edit_their_reviews() {
        let review = Review {
            id: "r1".to_string(),
            rating: 9,
            comment: Some("Fast replies".to_string()),
            author_id: Some("u1".to_string()),
            ..Review::default()
        };
        assert!(is_own_review(&review, Some("u1")));
        assert!(!is_own_review(&review, Some("u2")));
        assert!(!is_own_review(&review, None));
        let form = ReviewForm::editing(&review);
        assert_eq!(form.rating, 5);
        assert_eq!(form.comment, "Fast replies");
    }

    #[test]
    fn contact_form_validation() {
        let mut form = ContactForm::prefilled("Ana", "ana@", None);
        let errors = form.validate().err().unwrap_or_default();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
        assert_eq!(errors.get("message"), Some(REQUIRED));
        form.email = "ana@example.com".to_string();
        form.message = "Is the villa still available?".to_string();
        let request = form.validate();
        assert_eq!(request.map(|body| body.phone), Ok(None));
    }

    #[test]
    fn stars_round_to_whole_values() {
        assert_eq!(star_fill(4.6), [true, true, true, true, true]);
        assert_eq!(star_fill(4.4), [true, true, true, true, false]);
        assert_eq!(star_fill(-1.0), [false; 5]);
        assert_eq!(format_rating(4.66), "4.7");
        assert_eq!(format_rating(0.0), "0.0");
    }
}
