use crate::runtime::{error::DeviceError, output::OutputEvent};
use std::collections::VecDeque;
use std::future::Future;
use std::io::{BufRead, Write};
use std::pin::Pin;

pub const TEST_INPUTS_ENV: &str = "VADER_TEST_INPUTS";

/// A pending device or network operation. The driver awaits it before
/// moving to the next line.
pub type Suspension<T> = Pin<Box<dyn Future<Output = Result<T, DeviceError>> + Send>>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

/// The display, input, and device collaborator of the interpreter.
/// Swapping the host changes where output goes and how suspension points
/// are answered without touching the driver.
pub trait Host {
    fn display(&mut self, event: &OutputEvent);
    fn ask(&mut self, prompt: &str) -> Suspension<String>;
    fn locate(&mut self) -> Suspension<Location>;
    fn capture_photo(&mut self) -> Suspension<String>;
    fn http(&mut self, request: HttpRequest) -> Suspension<u16>;
}

/// Terminal host: prints to stdout, reads answers from stdin and performs
/// real HTTP requests. Camera and location are not available.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn display(&mut self, event: &OutputEvent) {
        println!("{event}");
    }

    fn ask(&mut self, prompt: &str) -> Suspension<String> {
        if !prompt.is_empty() {
            print!("{prompt} ");
            let _ = std::io::stdout().flush();
        }
        let prompt = prompt.to_string();
        Box::pin(async move {
            match tokio::task::spawn_blocking(move || read_answer(&prompt)).await {
                Ok(result) => result,
                Err(err) => Err(DeviceError::Input(err.to_string())),
            }
        })
    }

    fn locate(&mut self) -> Suspension<Location> {
        Box::pin(async {
            Err(DeviceError::Unavailable {
                feature: "ubicación",
            })
        })
    }

    fn capture_photo(&mut self) -> Suspension<String> {
        Box::pin(async { Err(DeviceError::Unavailable { feature: "cámara" }) })
    }

    fn http(&mut self, request: HttpRequest) -> Suspension<u16> {
        Box::pin(async move {
            match tokio::task::spawn_blocking(move || send_http(&request)).await {
                Ok(result) => result,
                Err(err) => Err(DeviceError::Network(err.to_string())),
            }
        })
    }
}

/// Reads one line through the process-wide stdin buffer, so answers piped
/// in ahead of time are consumed one prompt at a time.
fn read_answer(prompt: &str) -> Result<String, DeviceError> {
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(0) => Err(DeviceError::InputExhausted {
            prompt: prompt.to_string(),
        }),
        Ok(_) => Ok(answer.trim().to_string()),
        Err(err) => Err(DeviceError::Input(err.to_string())),
    }
}

fn send_http(request: &HttpRequest) -> Result<u16, DeviceError> {
    let call = match (request.method.as_str(), &request.body) {
        ("GET", _) => ureq::get(&request.url).call(),
        ("POST", Some(body)) => ureq::post(&request.url)
            .set("Content-Type", "application/json")
            .send_string(body),
        ("POST", None) => ureq::post(&request.url).call(),
        (other, _) => return Err(DeviceError::UnsupportedMethod(other.to_string())),
    };
    match call {
        Ok(response) => Ok(response.status()),
        Err(ureq::Error::Status(code, _)) => Ok(code),
        Err(err) => Err(DeviceError::Network(err.to_string())),
    }
}

/// Host with canned answers, used by tests and by `VADER_TEST_INPUTS`.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    answers: VecDeque<String>,
    location: Option<Location>,
    photo: Option<String>,
    http_status: Option<u16>,
    echo: bool,
    displayed: Vec<OutputEvent>,
    requests: Vec<HttpRequest>,
}

impl ScriptedHost {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Answers separated by `|`, for example `VADER_TEST_INPUTS="21|abc"`.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(TEST_INPUTS_ENV).ok()?;
        Some(Self::new(raw.split('|')))
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Location {
            latitude,
            longitude,
        });
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Also print every displayed event to stdout.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn displayed(&self) -> &[OutputEvent] {
        &self.displayed
    }

    pub fn requests(&self) -> &[HttpRequest] {
        &self.requests
    }
}

impl Host for ScriptedHost {
    fn display(&mut self, event: &OutputEvent) {
        if self.echo {
            println!("{event}");
        }
        self.displayed.push(event.clone());
    }

    fn ask(&mut self, prompt: &str) -> Suspension<String> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| DeviceError::InputExhausted {
                prompt: prompt.to_string(),
            });
        Box::pin(async move { answer })
    }

    fn locate(&mut self) -> Suspension<Location> {
        let location = self.location.ok_or(DeviceError::Unavailable {
            feature: "ubicación",
        });
        Box::pin(async move { location })
    }

    fn capture_photo(&mut self) -> Suspension<String> {
        let photo = self
            .photo
            .clone()
            .ok_or(DeviceError::Unavailable { feature: "cámara" });
        Box::pin(async move { photo })
    }

    fn http(&mut self, request: HttpRequest) -> Suspension<u16> {
        let status = self
            .http_status
            .ok_or_else(|| DeviceError::Network(format!("sin respuesta de {}", request.url)));
        self.requests.push(request);
        Box::pin(async move { status })
    }
}
