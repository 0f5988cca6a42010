//! Scripted session walkthrough.
//!
//! Drives the gateway the way a browser would:
//!   1. Register "alice", then try to register her again (duplicate alert)
//!   2. Log in with a wrong password (invalid credentials alert)
//!   3. Log in correctly and receive the session cookie
//!   4. Submit a prediction with the cookie and render the result page
//!   5. Log out, then show the prediction route redirecting to `/`

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use stroke_core::{
    gateway::{Request, Response},
    render::render_result_page,
    Gateway,
};
use stroke_risk::RuleTableScorer;
use stroke_session::{InMemorySessionStore, SessionConfig};

/// Bundled default session settings.
const DEFAULT_SESSION_CONFIG: &str = include_str!("../../config/session.toml");

const PREDICTION_FORM: [(&str, &str); 9] = [
    ("age", "67"),
    ("gender", "Male"),
    ("hypertension", "1"),
    ("heart_disease", "0"),
    ("avg_glucose_level", "171.2"),
    ("bmi", "27.4"),
    ("smoking_status", "formerly smoked"),
    ("work_type", "Private"),
    ("ever_married", "Yes"),
];

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = match config_path {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::from_toml_str(DEFAULT_SESSION_CONFIG)?,
    };
    info!(
        idle_timeout_secs = config.idle_timeout_secs,
        token_bytes = config.token_bytes,
        "session config loaded"
    );

    let store = Arc::new(InMemorySessionStore::new(config)?);
    let gateway = Gateway::new(Box::new(Arc::clone(&store)), Box::new(RuleTableScorer));

    println!("=== Stroke Risk Service Walkthrough ===");
    println!();

    let credentials = [("username", "alice"), ("password", "correct horse")];

    step("POST /register (alice)");
    show(&gateway.handle(&Request::post("/register", credentials))?);

    step("POST /register (alice again)");
    show(&gateway.handle(&Request::post("/register", credentials))?);

    step("POST /login (wrong password)");
    show(&gateway.handle(&Request::post(
        "/login",
        [("username", "alice"), ("password", "battery staple")],
    ))?);

    step("POST /login (correct password)");
    let response = gateway.handle(&Request::post("/login", credentials))?;
    show(&response);
    let cookie = match response {
        Response::Redirect {
            set_cookie: Some(cookie),
            ..
        } => cookie.split(';').next().unwrap_or_default().to_string(),
        other => return Err(format!("login did not issue a session cookie: {:?}", other).into()),
    };
    println!("    live sessions: {}", store.session_count()?);

    step("GET /home (with cookie)");
    show(&gateway.handle(&Request::get("/home").with_cookie(&cookie))?);

    step("POST /predict (with cookie)");
    for (field, value) in PREDICTION_FORM {
        println!("    {:<18} = {}", field, value);
    }
    let response =
        gateway.handle(&Request::post("/predict", PREDICTION_FORM).with_cookie(&cookie))?;
    match &response {
        Response::Assessment(assessment) => {
            println!(
                "    → {} ({}%): {}",
                assessment.risk_level, assessment.probability, assessment.recommendation
            );
            println!();
            println!("{}", render_result_page(assessment));
        }
        other => show(other),
    }

    step("GET /logout");
    show(&gateway.handle(&Request::get("/logout").with_cookie(&cookie))?);
    println!("    live sessions: {}", store.session_count()?);

    step("POST /predict (revoked cookie)");
    show(&gateway.handle(&Request::post("/predict", PREDICTION_FORM).with_cookie(&cookie))?);

    println!();
    println!("Walkthrough complete.");
    Ok(())
}

fn step(title: &str) {
    println!();
    println!("  {}", title);
}

fn show(response: &Response) {
    match response {
        Response::View(view) => println!("    → view {:?}", view),
        Response::Redirect {
            location,
            set_cookie,
        } => match set_cookie {
            // Print only the cookie's attributes; the token is a secret.
            Some(cookie) => {
                let attributes = cookie.split_once(';').map(|(_, a)| a.trim()).unwrap_or("");
                println!("    → redirect {} (Set-Cookie: session_id=…; {})", location, attributes)
            }
            None => println!("    → redirect {}", location),
        },
        Response::Alert {
            message,
            redirect_to,
        } => println!("    → alert \"{}\" then {}", message, redirect_to),
        Response::Assessment(assessment) => println!(
            "    → {} ({}%)",
            assessment.risk_level, assessment.probability
        ),
        Response::NotFound => println!("    → 404"),
    }
}
