//! Sign-in, registration and password recovery forms.

use crate::core::logic::normalize_text;
use crate::core::validation::{FieldErrors, PASSWORD_MISMATCH};
use terracasa_api_models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    VerifyCodeRequest,
};

/// Tab shown on the auth page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthTab {
    /// Existing account.
    #[default]
    Login,
    /// New account.
    Register,
}

/// Login inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Validate into a request body.
    ///
    /// # Errors
    /// Returns per-field errors for a malformed email or blank password.
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_email("email", &self.email);
        errors.require("password", &self.password);
        errors.into_result()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password repeated.
    pub confirm_password: String,
    /// Company name.
    pub company_name: String,
    /// Professional role.
    pub role_title: String,
    /// Home country code.
    pub base_country: String,
    /// Home city.
    pub base_city: String,
    /// Contact phone.
    pub phone: String,
}

impl RegisterForm {
    /// Validate into a request body; blank optional fields are omitted.
    ///
    /// # Errors
    /// Returns per-field errors for missing names, a malformed email, a short
    /// password or a confirmation that does not match.
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("firstName", &self.first_name);
        errors.require("lastName", &self.last_name);
        errors.require_email("email", &self.email);
        errors.require_password("password", &self.password);
        if errors.require("confirmPassword", &self.confirm_password)
            && self.confirm_password != self.password
        {
            errors.insert("confirmPassword", PASSWORD_MISMATCH);
        }
        errors.into_result()?;
        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company_name: normalize_text(&self.company_name),
            role_title: normalize_text(&self.role_title),
            base_country: normalize_text(&self.base_country).map(|code| code.to_ascii_uppercase()),
            base_city: normalize_text(&self.base_city),
            avatar_url: None,
            phone: normalize_text(&self.phone),
        })
    }
}

/// Step of the password recovery dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Ask for the account email.
    #[default]
    RequestCode,
    /// Enter the emailed code.
    EnterCode,
    /// Code accepted.
    Verified,
}

/// Password recovery dialog state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveryForm {
    /// Current step.
    pub step: RecoveryStep,
    /// Account email.
    pub email: String,
    /// Emailed code.
    pub code: String,
}

impl RecoveryForm {
    /// Validate the first step.
    ///
    /// # Errors
    /// Returns a field error for a malformed email.
    pub fn request_code(&self) -> Result<ForgotPasswordRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_email("email", &self.email);
        errors.into_result()?;
        Ok(ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        })
    }

    /// Validate the second step.
    ///
    /// # Errors
    /// Returns field errors for a malformed email or blank code.
    pub fn verify_code(&self) -> Result<VerifyCodeRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_email("email", &self.email);
        errors.require("code", &self.code);
        errors.into_result()?;
        Ok(VerifyCodeRequest {
            email: self.email.trim().to_string(),
            code: self.code.trim().to_string(),
        })
    }

    /// Move on after the server accepted the current step.
    pub fn advance(&mut self) {
        self.step = match self.step {
            RecoveryStep::RequestCode => RecoveryStep::EnterCode,
            RecoveryStep::EnterCode | RecoveryStep::Verified => RecoveryStep::Verified,
        };
    }
}

/// Change-password inputs on the profile page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
    /// Replacement repeated.
    pub confirm_password: String,
}

impl ChangePasswordForm {
    /// Validate into a request body.
    ///
    /// # Errors
    /// Returns per-field errors for a blank current password, a short
    /// replacement or a confirmation that does not match.
    pub fn validate(&self) -> Result<ChangePasswordRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("oldPassword", &self.old_password);
        errors.require_password("newPassword", &self.new_password);
        if errors.require("confirmPassword", &self.confirm_password)
            && self.confirm_password != self.new_password
        {
            errors.insert("confirmPassword", PASSWORD_MISMATCH);
        }
        errors.into_result()?;
        Ok(ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{INVALID_EMAIL, PASSWORD_TOO_SHORT, REQUIRED};

    #[test]
    fn login_requires_email_and_password() {
        let errors = LoginForm::default().validate().err().unwrap_or_default();
        assert_eq!(errors.get("email"), Some(REQUIRED));
        assert_eq!(errors.get("password"), Some(REQUIRED));

        let form = LoginForm {
            email: " ana@example.com ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            form.validate().map(|body| body.email),
            Ok("ana@example.com".to_string())
        );
    }

    #[test]
    fn register_checks_password_rules() {
        let mut form = RegisterForm {
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            email: "ana@".to_string(),
            password: "short".to_string(),
            confirm_password: "other".to_string(),
            ..RegisterForm::default()
        };
        let errors = form.validate().err().unwrap_or_default();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
        assert_eq!(errors.get("password"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(errors.get("confirmPassword"), Some(PASSWORD_MISMATCH));

        form.email = "ana@example.com".to_string();
        form.password = "long enough".to_string();
        form.confirm_password = "long enough".to_string();
        form.base_country = " es".to_string();
        let body = form.validate();
        assert_eq!(
            body.as_ref().map(|body| body.base_country.as_deref()),
            Ok(Some("ES"))
        );
        assert_eq!(body.map(|body| body.company_name), Ok(None));
    }

    #[test]
    fn recovery_walks_through_steps() {
        let mut form = RecoveryForm::default();
        assert!(form.request_code().is_err());
        form.email = "ana@example.com".to_string();
        assert!(form.request_code().is_ok());
        form.advance();
        assert_eq!(form.step, RecoveryStep::EnterCode);
        let errors = form.verify_code().err().unwrap_or_default();
        assert_eq!(errors.get("code"), Some(REQUIRED));
        form.code = " 123456 ".to_string();
        assert_eq!(form.verify_code().map(|body| body.code), Ok("123456".to_string()));
        form.advance();
        form.advance();
        assert_eq!(form.step, RecoveryStep::Verified);
    }

    #[test]
    fn change_password_requires_matching_confirmation() {
        let form = ChangePasswordForm {
            old_password: "old secret".to_string(),
            new_password: "new secret".to_string(),
            confirm_password: "new secrets".to_string(),
        };
        let errors = form.validate().err().unwrap_or_default();
        assert_eq!(errors.get("confirmPassword"), Some(PASSWORD_MISMATCH));
        assert!(!errors.contains("newPassword"));
    }
}
