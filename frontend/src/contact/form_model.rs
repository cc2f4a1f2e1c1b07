use crate::contact::submission::{RelaySuccess, SubmissionError};
use crate::contact::validation::{validate, ContactSubmission, Field, FieldErrors};

pub const SUCCESS_BANNER: &str = "Thanks! Your message is on its way. We'll get back to you soon.";

#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// Contact form state, independent of how it is rendered.
///
/// At most one submission is in flight: `begin_submit` refuses while a
/// previous one has not been passed to `finish`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    fields: ContactSubmission,
    errors: FieldErrors,
    submitting: bool,
    banner: Option<Banner>,
}

impl ContactForm {
    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        self.fields.set(field, value);
        self.errors.remove(&field);
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Validates and, when the form is sendable, marks it in flight and
    /// returns the payload to post.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.submitting {
            return None;
        }

        let validation = validate(&self.fields);
        self.errors = validation.field_errors;
        self.banner = None;
        if !validation.valid {
            return None;
        }

        self.submitting = true;
        Some(self.fields.clone())
    }

    pub fn finish(&mut self, result: Result<RelaySuccess, SubmissionError>) {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.fields = ContactSubmission::default();
                self.errors.clear();
                self.banner = Some(Banner::Success(SUCCESS_BANNER.to_string()));
            }
            Err(e) => {
                self.banner = Some(Banner::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::submission::interpret_response;
    use crate::contact::validation::{EMAIL_INVALID, NAME_REQUIRED};

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_field(Field::Name, "Linus".to_string());
        form.set_field(Field::Email, "linus@example.fi".to_string());
        form.set_field(Field::Phone, "+358 40 1234567".to_string());
        form.set_field(Field::Message, "A portfolio site, please.".to_string());
        form
    }

    fn delivered() -> Result<RelaySuccess, SubmissionError> {
        Ok(RelaySuccess {
            message: "ok".to_string(),
            message_id: Some("<1@example.com>".to_string()),
        })
    }

    #[test]
    fn invalid_form_is_never_sent() {
        let mut form = ContactForm::default();
        form.set_field(Field::Email, "linus".to_string());

        assert_eq!(form.begin_submit(), None);
        assert!(!form.is_submitting());
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = ContactForm::default();
        form.begin_submit();
        assert!(form.error(Field::Name).is_some());
        form.set_field(Field::Name, "L".to_string());
        assert_eq!(form.error(Field::Name), None);
        assert!(form.error(Field::Phone).is_some());
    }

    #[test]
    fn valid_form_goes_in_flight_with_its_fields() {
        let mut form = filled_form();
        let payload = form.begin_submit().expect("payload");
        assert_eq!(&payload, form.fields());
        assert!(form.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = filled_form();
        assert!(form.begin_submit().is_some());
        let before = form.clone();

        assert_eq!(form.begin_submit(), None);
        assert_eq!(form, before);

        form.finish(Err(SubmissionError::Network("offline".to_string())));
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn success_clears_the_form() {
        let mut form = filled_form();
        form.begin_submit();
        form.finish(delivered());

        assert!(!form.is_submitting());
        assert_eq!(form.fields(), &ContactSubmission::default());
        assert_eq!(form.banner(), Some(&Banner::Success(SUCCESS_BANNER.to_string())));
    }

    #[test]
    fn non_json_reply_keeps_the_fields() {
        let mut form = filled_form();
        let sent = form.begin_submit().unwrap();
        form.finish(interpret_response(200, Some("text/html"), "<p>hi</p>"));

        assert!(!form.is_submitting());
        assert_eq!(form.fields(), &sent);
        assert!(matches!(form.banner(), Some(Banner::Error(_))));
    }

    #[test]
    fn relay_error_detail_reaches_the_banner() {
        let mut form = filled_form();
        form.begin_submit();
        form.finish(interpret_response(
            500,
            Some("application/json"),
            r#"{"message":"erro","error":"SMTP down"}"#,
        ));

        assert!(!form.is_submitting());
        match form.banner() {
            Some(Banner::Error(text)) => assert!(text.contains("SMTP down")),
            other => panic!("expected an error banner, got {:?}", other),
        }
    }

    #[test]
    fn new_attempt_clears_the_old_banner() {
        let mut form = filled_form();
        form.begin_submit();
        form.finish(Err(SubmissionError::Status(503)));
        assert!(form.banner().is_some());

        form.begin_submit();
        assert_eq!(form.banner(), None);

        form.dismiss_banner();
        assert_eq!(form.banner(), None);
    }
}
