//! The request gateway: the thin layer between HTTP and the core.
//!
//! `Gateway` models the web application's routes without tying them to a
//! server framework. A hosting server parses each HTTP request into a
//! `Request`, calls `Gateway::handle`, and writes the returned `Response`.
//!
//! Flow for a protected route:
//!
//!   Cookie → `session_id` token → SessionStore::resolve → [handler] → Response
//!
//! A missing or dead session never surfaces as an error status; the client is
//! redirected to `/` instead. User-facing failures (`DuplicateUser`,
//! `InvalidCredentials`) become `Response::Alert`. Only an unusable store
//! propagates as `Err`.

use tracing::{debug, info, warn};

use stroke_contracts::{
    assessment::RiskAssessment,
    error::{StrokeError, StrokeResult},
    health::HealthRecord,
    session::SessionToken,
};

use crate::traits::{RiskScorer, SessionStore};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Header value that removes the session cookie.
pub const CLEAR_SESSION_COOKIE: &str = "session_id=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A parsed incoming request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// The raw `Cookie` header, if any.
    pub cookie_header: Option<String>,
    /// Decoded `application/x-www-form-urlencoded` body pairs.
    pub form: Vec<(String, String)>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            cookie_header: None,
            form: Vec::new(),
        }
    }

    pub fn post<K, V>(path: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into(),
            cookie_header: None,
            form: form.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn with_cookie(mut self, header: impl Into<String>) -> Self {
        self.cookie_header = Some(header.into());
        self
    }

    /// Last value submitted for `key`, or the empty string. Repeated keys
    /// resolve the same way as in `HealthRecord::from_pairs`.
    fn field(&self, key: &str) -> &str {
        self.form
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Static pages served as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    Register,
    Login,
    Home,
}

/// What the hosting server should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    View(View),
    Redirect {
        location: String,
        /// A full `Set-Cookie` header value to attach.
        set_cookie: Option<String>,
    },
    /// A message shown to the user, followed by navigation to `redirect_to`.
    Alert { message: String, redirect_to: String },
    /// A scored prediction, rendered with `render::render_result_page`.
    Assessment(RiskAssessment),
    NotFound,
}

impl Response {
    fn redirect(location: &str) -> Self {
        Self::Redirect {
            location: location.to_string(),
            set_cookie: None,
        }
    }

    fn alert(message: &str, redirect_to: &str) -> Self {
        Self::Alert {
            message: message.to_string(),
            redirect_to: redirect_to.to_string(),
        }
    }
}

/// Extract the session token from a `Cookie` header.
///
/// The header is a `; `-separated list of `name=value` pairs. Only an exact
/// `session_id` name matches, and an empty value counts as absent.
pub fn session_token_from_cookie(header: &str) -> Option<SessionToken> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(SessionToken::new)
}

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &SessionToken) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token.as_str())
}

/// Routes requests to the session store and the scorer.
///
/// Construct one gateway per process; it is shared by every request handler.
pub struct Gateway {
    sessions: Box<dyn SessionStore>,
    scorer: Box<dyn RiskScorer>,
}

impl Gateway {
    pub fn new(sessions: Box<dyn SessionStore>, scorer: Box<dyn RiskScorer>) -> Self {
        Self { sessions, scorer }
    }

    /// Handle one request.
    ///
    /// # Errors
    ///
    /// Returns `Err(StoreUnavailable)` only when the session store cannot be
    /// used. Every user-facing failure is a `Response` variant.
    pub fn handle(&self, request: &Request) -> StrokeResult<Response> {
        debug!(method = ?request.method, path = %request.path, "handling request");

        match (request.method, request.path.as_str()) {
            (Method::Get, "/") => {
                if self.current_user(request)?.is_some() {
                    Ok(Response::redirect("/home"))
                } else {
                    Ok(Response::View(View::Index))
                }
            }
            (Method::Get, "/register") => Ok(Response::View(View::Register)),
            (Method::Post, "/register") => self.register(request),
            (Method::Get, "/login") => Ok(Response::View(View::Login)),
            (Method::Post, "/login") => self.login(request),
            (Method::Get, "/home") => match self.current_user(request)? {
                Some(_) => Ok(Response::View(View::Home)),
                None => Ok(Response::redirect("/")),
            },
            (Method::Post, "/predict") => self.predict(request),
            (Method::Get, "/logout") => self.logout(request),
            _ => Ok(Response::NotFound),
        }
    }

    /// Resolve the request's session cookie to a username.
    ///
    /// `NoSession` is folded into `None`; only store failures propagate.
    fn current_user(&self, request: &Request) -> StrokeResult<Option<String>> {
        let Some(token) = request
            .cookie_header
            .as_deref()
            .and_then(session_token_from_cookie)
        else {
            return Ok(None);
        };

        match self.sessions.resolve(&token) {
            Ok(username) => Ok(Some(username)),
            Err(StrokeError::NoSession) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn register(&self, request: &Request) -> StrokeResult<Response> {
        let username = request.field("username");
        match self.sessions.register(username, request.field("password")) {
            Ok(()) => {
                info!(username = %username, "user registered");
                Ok(Response::alert("Registration successful!", "/"))
            }
            Err(StrokeError::DuplicateUser { .. }) => {
                warn!(username = %username, "registration rejected: duplicate username");
                Ok(Response::alert("Username already exists!", "/register"))
            }
            Err(e) => Err(e),
        }
    }

    fn login(&self, request: &Request) -> StrokeResult<Response> {
        let username = request.field("username");
        match self.sessions.authenticate(username, request.field("password")) {
            Ok(token) => {
                info!(username = %username, "login succeeded");
                Ok(Response::Redirect {
                    location: "/home".to_string(),
                    set_cookie: Some(session_cookie(&token)),
                })
            }
            Err(StrokeError::InvalidCredentials) => {
                warn!(username = %username, "login rejected");
                Ok(Response::alert("Invalid credentials!", "/login"))
            }
            Err(e) => Err(e),
        }
    }

    fn predict(&self, request: &Request) -> StrokeResult<Response> {
        let Some(username) = self.current_user(request)? else {
            debug!("prediction without a live session, redirecting");
            return Ok(Response::redirect("/"));
        };

        let record = HealthRecord::from_pairs(request.form.iter().map(|(k, v)| (k, v.as_str())));
        let assessment = self.scorer.assess(&record);

        info!(
            username = %username,
            risk_level = %assessment.risk_level,
            probability = assessment.probability,
            "prediction scored"
        );
        Ok(Response::Assessment(assessment))
    }

    fn logout(&self, request: &Request) -> StrokeResult<Response> {
        if let Some(token) = request
            .cookie_header
            .as_deref()
            .and_then(session_token_from_cookie)
        {
            self.sessions.revoke(&token)?;
        }
        Ok(Response::Redirect {
            location: "/".to_string(),
            set_cookie: Some(CLEAR_SESSION_COOKIE.to_string()),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
