use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::browser::driver::{Driver, ElementId};
use crate::browser::locator::{Locator, W3cSelector, attribute_selector};
use crate::error::SessionError;

/// Key under which W3C WebDriver returns element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4a4e-bfbd-6d3b5b0fb1b1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// One WebDriver HTTP call: method, path relative to the endpoint, JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WebDriverCommand {
    pub name: &'static str,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl WebDriverCommand {
    pub fn new_session(capabilities: &Capabilities) -> Self {
        WebDriverCommand {
            name: "new_session",
            method: Method::Post,
            path: "/session".into(),
            body: Some(capabilities.to_json()),
        }
    }

    pub fn delete_session(session: &str) -> Self {
        WebDriverCommand {
            name: "delete_session",
            method: Method::Delete,
            path: format!("/session/{}", session),
            body: None,
        }
    }

    pub fn navigate(session: &str, url: &str) -> Self {
        WebDriverCommand {
            name: "navigate",
            method: Method::Post,
            path: format!("/session/{}/url", session),
            body: Some(json!({ "url": url })),
        }
    }

    pub fn find_elements(session: &str, selector: &W3cSelector) -> Self {
        WebDriverCommand {
            name: "find_elements",
            method: Method::Post,
            path: format!("/session/{}/elements", session),
            body: Some(json!({ "using": selector.using, "value": selector.value })),
        }
    }

    pub fn find_child_elements(session: &str, parent: &ElementId, selector: &W3cSelector) -> Self {
        WebDriverCommand {
            name: "find_child_elements",
            method: Method::Post,
            path: format!("/session/{}/element/{}/elements", session, parent),
            body: Some(json!({ "using": selector.using, "value": selector.value })),
        }
    }

    pub fn click(session: &str, element: &ElementId) -> Self {
        WebDriverCommand {
            name: "click",
            method: Method::Post,
            path: format!("/session/{}/element/{}/click", session, element),
            body: Some(json!({})),
        }
    }

    pub fn send_keys(session: &str, element: &ElementId, text: &str) -> Self {
        WebDriverCommand {
            name: "send_keys",
            method: Method::Post,
            path: format!("/session/{}/element/{}/value", session, element),
            body: Some(json!({ "text": text })),
        }
    }

    pub fn attribute(session: &str, element: &ElementId, name: &str) -> Self {
        WebDriverCommand {
            name: "attribute",
            method: Method::Get,
            path: format!("/session/{}/element/{}/attribute/{}", session, element, name),
            body: None,
        }
    }

    pub fn text(session: &str, element: &ElementId) -> Self {
        WebDriverCommand {
            name: "text",
            method: Method::Get,
            path: format!("/session/{}/element/{}/text", session, element),
            body: None,
        }
    }

    pub fn tag_name(session: &str, element: &ElementId) -> Self {
        WebDriverCommand {
            name: "tag_name",
            method: Method::Get,
            path: format!("/session/{}/element/{}/name", session, element),
            body: None,
        }
    }

    pub fn displayed(session: &str, element: &ElementId) -> Self {
        WebDriverCommand {
            name: "displayed",
            method: Method::Get,
            path: format!("/session/{}/element/{}/displayed", session, element),
            body: None,
        }
    }
}

/// Browser requested when opening a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub browser: BrowserKind,
    pub headless: bool,
}

impl Capabilities {
    pub fn to_json(&self) -> Value {
        let always_match = match self.browser {
            BrowserKind::Chrome => {
                let args: Vec<&str> = if self.headless { vec!["--headless=new"] } else { vec![] };
                json!({ "browserName": "chrome", "goog:chromeOptions": { "args": args } })
            }
            BrowserKind::Firefox => {
                let args: Vec<&str> = if self.headless { vec!["-headless"] } else { vec![] };
                json!({ "browserName": "firefox", "moz:firefoxOptions": { "args": args } })
            }
        };
        json!({ "capabilities": { "alwaysMatch": always_match } })
    }
}

/// Error payload carried in `value` of a failed WebDriver response.
#[derive(Debug, Deserialize)]
pub struct WebDriverErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Turn a raw WebDriver response into its `value`, or the matching error.
pub fn decode_response(command: &str, success: bool, mut body: Value) -> Result<Value, SessionError> {
    let value = body
        .get_mut("value")
        .map(Value::take)
        .ok_or_else(|| SessionError::MalformedResponse {
            command: command.into(),
            detail: "missing 'value'".into(),
        })?;

    if success {
        return Ok(value);
    }

    let err: WebDriverErrorBody =
        serde_json::from_value(value).map_err(|e| SessionError::MalformedResponse {
            command: command.into(),
            detail: format!("error body: {}", e),
        })?;

    Err(classify_error(command, err))
}

/// Map a W3C error code onto the session error taxonomy.
pub fn classify_error(command: &str, err: WebDriverErrorBody) -> SessionError {
    match err.error.as_str() {
        "no such element" => SessionError::NotFound {
            locator: err.message,
        },
        "stale element reference"
        | "element not interactable"
        | "element click intercepted"
        | "invalid element state" => SessionError::Interaction {
            command: command.into(),
            message: format!("{}: {}", err.error, err.message),
        },
        _ => SessionError::Protocol {
            command: command.into(),
            error: err.error,
            message: err.message,
        },
    }
}

/// Pull element references out of a find-elements result.
pub fn element_ids(command: &str, value: &Value) -> Result<Vec<ElementId>, SessionError> {
    let items = value.as_array().ok_or_else(|| SessionError::MalformedResponse {
        command: command.into(),
        detail: "expected an array of elements".into(),
    })?;

    items
        .iter()
        .map(|item| {
            item[ELEMENT_KEY]
                .as_str()
                .map(ElementId::new)
                .ok_or_else(|| SessionError::MalformedResponse {
                    command: command.into(),
                    detail: format!("element reference without '{}'", ELEMENT_KEY),
                })
        })
        .collect()
}

/// A W3C WebDriver session on an already running driver endpoint
/// (chromedriver, geckodriver, a Selenium grid).
pub struct WebDriverSession {
    client: Client,
    endpoint: String,
    session_id: Option<String>,
    owned: bool,
}

impl WebDriverSession {
    /// Open a new session. It is deleted on [`quit`](Self::quit) or drop.
    pub fn start(endpoint: &str, capabilities: Capabilities, timeout: Duration) -> Result<Self, SessionError> {
        let mut session = WebDriverSession {
            client: build_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            session_id: None,
            owned: true,
        };

        let value = session.send(&WebDriverCommand::new_session(&capabilities))?;
        let id = value["sessionId"]
            .as_str()
            .ok_or_else(|| SessionError::MalformedResponse {
                command: "new_session".into(),
                detail: "missing sessionId".into(),
            })?;
        session.session_id = Some(id.to_string());
        debug!(session = id, "webdriver session started");

        Ok(session)
    }

    /// Reuse a session someone else opened. It is left open on drop.
    pub fn attach(endpoint: &str, session_id: &str, timeout: Duration) -> Result<Self, SessionError> {
        Ok(WebDriverSession {
            client: build_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            session_id: Some(session_id.to_string()),
            owned: false,
        })
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn id(&self) -> Result<&str, SessionError> {
        self.session_id.as_deref().ok_or(SessionError::NoSession)
    }

    /// Send a command and return its `value`.
    fn send(&self, command: &WebDriverCommand) -> Result<Value, SessionError> {
        let url = format!("{}{}", self.endpoint, command.path);
        debug!(command = command.name, %url, "webdriver request");

        let request = match command.method {
            Method::Get => self.client.get(&url),
            Method::Post => self
                .client
                .post(&url)
                .json(command.body.as_ref().unwrap_or(&Value::Object(Default::default()))),
            Method::Delete => self.client.delete(&url),
        };

        let response = request.send()?;
        let success = response.status().is_success();
        let body: Value = response.json()?;
        decode_response(command.name, success, body)
    }

    /// Close the session if this value opened it.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if !self.owned {
            self.session_id = None;
            return Ok(());
        }
        if let Some(id) = self.session_id.take() {
            self.send(&WebDriverCommand::delete_session(&id))?;
        }
        Ok(())
    }
}

impl Driver for WebDriverSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        let command = WebDriverCommand::navigate(self.id()?, url);
        self.send(&command)?;
        Ok(())
    }

    fn find(&mut self, locator: &Locator) -> Result<ElementId, SessionError> {
        let command = WebDriverCommand::find_elements(self.id()?, &locator.to_w3c());
        let value = self.send(&command)?;
        let mut ids = element_ids(command.name, &value)?;
        match ids.len() {
            0 => Err(SessionError::not_found(locator)),
            1 => Ok(ids.remove(0)),
            count => Err(SessionError::AmbiguousLocator {
                locator: locator.to_string(),
                count,
            }),
        }
    }

    fn click(&mut self, element: &ElementId) -> Result<(), SessionError> {
        let command = WebDriverCommand::click(self.id()?, element);
        self.send(&command)?;
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> Result<(), SessionError> {
        let command = WebDriverCommand::send_keys(self.id()?, element, text);
        self.send(&command)?;
        Ok(())
    }

    fn select_by_value(&mut self, element: &ElementId, value: &str) -> Result<(), SessionError> {
        let tag = self.send(&WebDriverCommand::tag_name(self.id()?, element))?;
        if !tag.as_str().is_some_and(|t| t.eq_ignore_ascii_case("select")) {
            return Err(SessionError::Interaction {
                command: "select_by_value".into(),
                message: format!("element is <{}>, not <select>", tag.as_str().unwrap_or("?")),
            });
        }

        let option = W3cSelector {
            using: "css selector",
            value: format!("option{}", attribute_selector("value", value)),
        };
        let command = WebDriverCommand::find_child_elements(self.id()?, element, &option);
        let found = self.send(&command)?;
        let options = element_ids(command.name, &found)?;
        let first = options.first().ok_or_else(|| SessionError::Interaction {
            command: "select_by_value".into(),
            message: format!("no option with value '{}'", value),
        })?;

        let click = WebDriverCommand::click(self.id()?, first);
        self.send(&click)?;
        Ok(())
    }

    fn attribute(&mut self, element: &ElementId, name: &str) -> Result<Option<String>, SessionError> {
        let value = self.send(&WebDriverCommand::attribute(self.id()?, element, name))?;
        Ok(value.as_str().map(str::to_string))
    }

    fn text(&mut self, element: &ElementId) -> Result<String, SessionError> {
        let value = self.send(&WebDriverCommand::text(self.id()?, element))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SessionError::MalformedResponse {
                command: "text".into(),
                detail: "text was not a string".into(),
            })
    }

    fn is_displayed(&mut self, element: &ElementId) -> Result<bool, SessionError> {
        let value = self.send(&WebDriverCommand::displayed(self.id()?, element))?;
        value.as_bool().ok_or_else(|| SessionError::MalformedResponse {
            command: "displayed".into(),
            detail: "displayed was not a boolean".into(),
        })
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        if let Err(e) = self.quit() {
            warn!("failed to close webdriver session: {}", e);
        }
    }
}

fn build_client(timeout: Duration) -> Result<Client, SessionError> {
    Ok(Client::builder().timeout(timeout).build()?)
}
