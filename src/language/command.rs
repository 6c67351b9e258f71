use std::fmt;

/// Classification of a single source line, in matching priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Display,
    Assign,
    Ask,
    Read,
    Convert,
    Conditional,
    FunctionDef,
    Loop,
    Call,
    Widget,
    Device,
    BlockMarker,
    Unrecognized,
}

/// A classified line together with the pieces its handler needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Display { expr: String },
    Assign { name: String, expr: String },
    Ask { prompt: String, target: Option<String> },
    Read { target: String },
    Convert { name: String, to: Conversion },
    Conditional { condition: String },
    FunctionDef { name: String },
    Loop { count: String },
    Call { name: String },
    Widget(Widget),
    Device(DeviceRequest),
    BlockMarker(Marker),
    Unrecognized,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Display { .. } => CommandKind::Display,
            Command::Assign { .. } => CommandKind::Assign,
            Command::Ask { .. } => CommandKind::Ask,
            Command::Read { .. } => CommandKind::Read,
            Command::Convert { .. } => CommandKind::Convert,
            Command::Conditional { .. } => CommandKind::Conditional,
            Command::FunctionDef { .. } => CommandKind::FunctionDef,
            Command::Loop { .. } => CommandKind::Loop,
            Command::Call { .. } => CommandKind::Call,
            Command::Widget(_) => CommandKind::Widget,
            Command::Device(_) => CommandKind::Device,
            Command::BlockMarker(_) => CommandKind::BlockMarker,
            Command::Unrecognized => CommandKind::Unrecognized,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Number,
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Widget {
    Button {
        label: String,
        action: Option<String>,
    },
    Title {
        text: String,
    },
}

/// Commands that talk to a device or the network and therefore suspend
/// the driver until the host answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceRequest {
    CapturePhoto,
    Locate,
    Http {
        method: String,
        url: String,
        body: Option<String>,
    },
}

impl fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceRequest::CapturePhoto => write!(f, "tomar foto"),
            DeviceRequest::Locate => write!(f, "obtener ubicacion"),
            DeviceRequest::Http { method, url, .. } => write!(f, "enviar http {method} {url}"),
        }
    }
}

/// Branch and terminator keywords of the block-structured commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Else,
    ElseIf(String),
    EndIf,
    EndLoop,
    EndFunction,
}
