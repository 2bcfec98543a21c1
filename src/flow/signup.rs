use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::browser::driver::Driver;
use crate::config::ConfigSource;
use crate::error::PageError;
use crate::page::registration::RegistrationPage;

/// Values typed on the first signup panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupDetails {
    pub name: String,
    pub email: String,
}

/// One page-object call in the signup workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    NavigateToBase,
    OpenSignupMenu,
    SetName,
    SetEmail,
    SubmitSignup,
    SelectGenderTitle,
    FillRegistrationForm,
    SetBirthDate,
    SelectCountry,
    SubmitRegistration,
}

/// Steps up to and including submitting the name/email panel.
pub const SIGNUP_STEPS: [SignupStep; 5] = [
    SignupStep::NavigateToBase,
    SignupStep::OpenSignupMenu,
    SignupStep::SetName,
    SignupStep::SetEmail,
    SignupStep::SubmitSignup,
];

/// The complete account creation sequence, in the order the form expects.
pub const REGISTRATION_STEPS: [SignupStep; 10] = [
    SignupStep::NavigateToBase,
    SignupStep::OpenSignupMenu,
    SignupStep::SetName,
    SignupStep::SetEmail,
    SignupStep::SubmitSignup,
    SignupStep::SelectGenderTitle,
    SignupStep::FillRegistrationForm,
    SignupStep::SetBirthDate,
    SignupStep::SelectCountry,
    SignupStep::SubmitRegistration,
];

impl fmt::Display for SignupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignupStep::NavigateToBase => "navigate to base url",
            SignupStep::OpenSignupMenu => "open signup menu",
            SignupStep::SetName => "set name",
            SignupStep::SetEmail => "set email",
            SignupStep::SubmitSignup => "submit signup",
            SignupStep::SelectGenderTitle => "select title",
            SignupStep::FillRegistrationForm => "fill registration form",
            SignupStep::SetBirthDate => "set birth date",
            SignupStep::SelectCountry => "select country",
            SignupStep::SubmitRegistration => "submit registration",
        };
        f.write_str(name)
    }
}

/// What the page shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Confirmation heading text, e.g. "ACCOUNT CREATED!"
    Created(String),
    /// Error text shown on the signup panel
    Rejected(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Created(m) | Outcome::Rejected(m) => m,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Outcome::Created(_))
    }
}

/// Run a single workflow step against the page.
pub fn run_step<D: Driver, C: ConfigSource>(
    page: &mut RegistrationPage<'_, D, C>,
    step: SignupStep,
    details: &SignupDetails,
) -> Result<(), PageError> {
    match step {
        SignupStep::NavigateToBase => page.navigate_to_base(),
        SignupStep::OpenSignupMenu => page.open_signup_menu(),
        SignupStep::SetName => page.set_name(&details.name),
        SignupStep::SetEmail => page.set_email(&details.email),
        SignupStep::SubmitSignup => page.submit_signup(),
        SignupStep::SelectGenderTitle => page.select_gender_title(),
        SignupStep::FillRegistrationForm => page.fill_registration_form(),
        SignupStep::SetBirthDate => page.set_birth_date(),
        SignupStep::SelectCountry => page.select_country(),
        SignupStep::SubmitRegistration => page.submit_registration(),
    }
}

/// Run `steps` in order, stopping at the first failure.
pub fn run_steps<D: Driver, C: ConfigSource>(
    page: &mut RegistrationPage<'_, D, C>,
    steps: &[SignupStep],
    details: &SignupDetails,
) -> Result<(), PageError> {
    for (i, step) in steps.iter().enumerate() {
        info!(step = i + 1, total = steps.len(), "{}", step);
        run_step(page, *step, details)?;
    }
    Ok(())
}

/// Fill and submit the whole registration form.
pub fn register<D: Driver, C: ConfigSource>(
    page: &mut RegistrationPage<'_, D, C>,
    details: &SignupDetails,
) -> Result<(), PageError> {
    run_steps(page, &REGISTRATION_STEPS, details)
}

/// Submit only the name/email panel. Used when the email is expected to be
/// rejected before the full form opens.
pub fn signup_only<D: Driver, C: ConfigSource>(
    page: &mut RegistrationPage<'_, D, C>,
    details: &SignupDetails,
) -> Result<(), PageError> {
    run_steps(page, &SIGNUP_STEPS, details)
}

/// Read the confirmation message, falling back to the error message when no
/// confirmation is on the page.
pub fn read_outcome<D: Driver, C: ConfigSource>(
    page: &mut RegistrationPage<'_, D, C>,
) -> Result<Outcome, PageError> {
    let confirmation = page.confirmation_message().and_then(|mut el| el.text());
    match confirmation {
        Ok(text) => Ok(Outcome::Created(text)),
        Err(e) if e.is_locator_not_found() => {
            let text = page.error_message()?.text()?;
            Ok(Outcome::Rejected(text))
        }
        Err(e) => Err(e),
    }
}
