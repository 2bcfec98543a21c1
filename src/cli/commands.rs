use tracing::{info, warn};

use crate::browser::webdriver::WebDriverSession;
use crate::cli::config::{AppConfig, Expectation};
use crate::error::SessionError;
use crate::flow::signup::{Outcome, SignupDetails, read_outcome, register, signup_only};
use crate::page::registration::RegistrationPage;

/// Open a new session on `endpoint`, or attach to `session_id` when given.
pub fn open_session(
    config: &AppConfig,
    endpoint: &str,
    session_id: Option<&str>,
) -> Result<WebDriverSession, SessionError> {
    let timeout = config.webdriver.timeout();
    match session_id {
        Some(id) => {
            info!(endpoint, session = id, "attaching to webdriver session");
            WebDriverSession::attach(endpoint, id, timeout)
        }
        None => {
            info!(endpoint, browser = ?config.webdriver.browser, "starting webdriver session");
            WebDriverSession::start(endpoint, config.webdriver.capabilities(), timeout)
        }
    }
}

// ============================================================================
// register subcommand
// ============================================================================

/// Run the full registration and return whether the outcome met `expect`.
pub fn cmd_register(
    config: &AppConfig,
    endpoint: &str,
    session_id: Option<&str>,
    details: &SignupDetails,
    expect: Option<Expectation>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let locators = config.locator_table()?;
    let mut session = open_session(config, endpoint, session_id)?;

    let outcome = {
        let mut page = RegistrationPage::with_locators(&mut session, &config.data, locators);
        register(&mut page, details)?;
        read_outcome(&mut page)?
    };
    session.quit()?;

    print_outcome(&outcome);
    Ok(outcome_matches(&outcome, expect))
}

// ============================================================================
// signup subcommand
// ============================================================================

/// Submit the signup panel. Returns the error message if the page shows one.
pub fn cmd_signup(
    config: &AppConfig,
    endpoint: &str,
    session_id: Option<&str>,
    details: &SignupDetails,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let locators = config.locator_table()?;
    let mut session = open_session(config, endpoint, session_id)?;

    let shown = {
        let mut page = RegistrationPage::with_locators(&mut session, &config.data, locators);
        signup_only(&mut page, details)?;
        match page.error_message() {
            Ok(mut element) => Some(element.text()?),
            Err(e) if e.is_locator_not_found() => None,
            Err(e) => return Err(e.into()),
        }
    };
    session.quit()?;

    match &shown {
        Some(message) => println!("Signup rejected: {}", message),
        None => println!("Signup accepted, registration form opened"),
    }
    Ok(shown)
}

// ============================================================================
// check-config subcommand
// ============================================================================

/// Print missing data keys. Returns true when none are missing.
pub fn cmd_check_config(config: &AppConfig) -> bool {
    let missing = config.data.missing_keys();
    if missing.is_empty() {
        println!("All {} registration keys are set", crate::config::keys::ALL.len());
        return true;
    }

    for key in missing {
        warn!(key, "missing configuration key");
        println!("missing: {}", key);
    }
    false
}

// ============================================================================
// locators subcommand
// ============================================================================

pub fn cmd_locators(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.locator_table()?;
    for (field, locator) in table.iter() {
        println!("{:<20} {}", field.name(), locator);
    }
    Ok(())
}

pub fn outcome_matches(outcome: &Outcome, expect: Option<Expectation>) -> bool {
    match expect {
        None => true,
        Some(Expectation::Created) => outcome.is_created(),
        Some(Expectation::Rejected) => !outcome.is_created(),
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Created(message) => println!("Account created: {}", message),
        Outcome::Rejected(message) => println!("Registration rejected: {}", message),
    }
}
