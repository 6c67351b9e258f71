use crate::language::{
    classifier,
    command::{Command, Conversion, DeviceRequest, Widget},
    errors::BlockKind,
    program::{Line, Program},
};
use crate::runtime::{
    blocks::{self, FunctionTable},
    environment::Environment,
    error::{RuntimeError, RuntimeResult},
    evaluator::{evaluate, evaluate_condition},
    host::{Host, HttpRequest, Suspension},
    output::{OutputEvent, Transcript},
    suspension::SuspensionRuntime,
    value::{parse_leading_number, Value},
};
use crate::translate;
use std::ops::Range;
use std::rc::Rc;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

pub const PHOTO_VAR: &str = "ultima_foto";
pub const LATITUDE_VAR: &str = "latitud";
pub const LONGITUDE_VAR: &str = "longitud";
pub const HTTP_STATUS_VAR: &str = "ultima_respuesta_http";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Line-by-line driver. Owns the single flat environment and the function
/// table of the program being run, and is the only place that awaits a
/// host suspension.
///
/// Must not be driven from inside an async context: suspensions are
/// awaited on a private current-thread runtime.
pub struct Interpreter<H: Host> {
    host: H,
    env: Environment,
    functions: FunctionTable,
    transcript: Transcript,
    suspensions: SuspensionRuntime,
    options: RunOptions,
    depth: usize,
}

impl<H: Host> Interpreter<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            env: Environment::new(),
            functions: FunctionTable::new(),
            transcript: Transcript::new(),
            suspensions: SuspensionRuntime::new(),
            options: RunOptions::default(),
            depth: 0,
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs a whole program against a fresh environment. Programs in
    /// another language are first normalized to Spanish keywords.
    /// Structural errors are reported before the first line executes.
    pub fn run(&mut self, program: &Program) -> RuntimeResult<Transcript> {
        self.env.clear();
        self.functions.clear();
        self.transcript = Transcript::new();
        self.depth = 0;

        let program = translate::normalize_program(program);
        let lines = program.lines();
        if let Some(err) = blocks::validate(lines).into_iter().next() {
            return Err(err.into());
        }
        self.functions = blocks::collect_functions(lines)?;
        tracing::debug!(
            program = program.name(),
            functions = self.functions.len(),
            "running program"
        );

        self.execute_lines(lines, 0..lines.len())?;
        Ok(std::mem::take(&mut self.transcript))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Executes `lines[range]`. Block lookups still see the whole slice, so
    /// a terminator past the end of the range is found the same way it is
    /// at top level.
    fn execute_lines(&mut self, lines: &[Line], range: Range<usize>) -> RuntimeResult<()> {
        let mut index = range.start;
        while index < range.end {
            index = self.execute_line(lines, index)?;
        }
        Ok(())
    }

    /// Executes one line and returns the index to resume at.
    fn execute_line(&mut self, lines: &[Line], index: usize) -> RuntimeResult<usize> {
        let line = &lines[index];
        if !line.is_code() {
            return Ok(index + 1);
        }
        let command = classifier::parse_command(&line.text);
        tracing::trace!(line = line.number, kind = ?command.kind(), "executing");

        match command {
            Command::Display { expr } => {
                let value = evaluate(&expr, &self.env);
                self.emit(OutputEvent::Text(value.to_display_string()));
            }
            Command::Assign { name, expr } => {
                let value = evaluate(&expr, &self.env);
                self.env.set(name, value);
            }
            Command::Ask { prompt, target } => {
                let pending = self.host.ask(&prompt);
                let answer = self.suspend(pending)?;
                if let (Some(answer), Some(target)) = (answer, target) {
                    self.env.set(target, Value::Text(answer));
                }
            }
            Command::Read { target } => {
                let pending = self.host.ask("");
                if let Some(answer) = self.suspend(pending)? {
                    self.env.set(target, Value::Text(answer));
                }
            }
            Command::Convert { name, to } => self.convert(&name, to),
            Command::Conditional { condition } => {
                return self.run_conditional(lines, index, &condition);
            }
            Command::FunctionDef { name } => {
                let block = blocks::find_block_end(lines, index, BlockKind::FunctionDef)?;
                self.functions
                    .insert(name, Rc::from(&lines[block.body()]));
                return Ok(block.end + 1);
            }
            Command::Loop { count } => return self.run_loop(lines, index, &count),
            Command::Call { name } => self.call(&name)?,
            Command::Widget(Widget::Title { text }) => self.emit(OutputEvent::Title(text)),
            Command::Widget(Widget::Button { label, action }) => {
                self.emit(OutputEvent::Button { label, action })
            }
            Command::Device(request) => self.run_device(request)?,
            Command::BlockMarker(marker) => {
                tracing::debug!(line = line.number, ?marker, "marker outside of its block");
            }
            Command::Unrecognized => {
                tracing::debug!(line = line.number, text = %line.text, "unrecognized line");
            }
        }
        Ok(index + 1)
    }

    fn run_conditional(
        &mut self,
        lines: &[Line],
        index: usize,
        condition: &str,
    ) -> RuntimeResult<usize> {
        let block = blocks::find_block_end(lines, index, BlockKind::Conditional)?;

        let mut arms = Vec::with_capacity(block.branches.len() + 1);
        let mut arm_condition = Some(condition.to_string());
        let mut arm_start = block.start + 1;
        for branch in &block.branches {
            arms.push((arm_condition, arm_start..branch.index));
            arm_condition = branch.condition.clone();
            arm_start = branch.index + 1;
        }
        arms.push((arm_condition, arm_start..block.end));

        for (condition, range) in arms {
            let taken = match &condition {
                Some(condition) => evaluate_condition(condition, &self.env),
                None => true,
            };
            if taken {
                self.execute_lines(lines, range)?;
                break;
            }
        }
        Ok(block.end + 1)
    }

    fn run_loop(&mut self, lines: &[Line], index: usize, count: &str) -> RuntimeResult<usize> {
        let block = blocks::find_block_end(lines, index, BlockKind::Loop)?;
        let Some(times) = loop_count(&evaluate(count, &self.env)) else {
            tracing::debug!(line = lines[index].number, count, "loop count is not a non-negative integer, skipping");
            return Ok(block.end + 1);
        };
        for _ in 0..times {
            self.execute_lines(lines, block.body())?;
        }
        Ok(block.end + 1)
    }

    fn call(&mut self, name: &str) -> RuntimeResult<()> {
        let Some(body) = self.functions.get(name).cloned() else {
            tracing::debug!(name, "no function with this name");
            return Ok(());
        };
        if self.depth >= self.options.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                name: name.to_string(),
                limit: self.options.max_call_depth,
            });
        }
        self.depth += 1;
        let result = self.execute_lines(&body, 0..body.len());
        self.depth -= 1;
        result
    }

    fn convert(&mut self, name: &str, to: Conversion) {
        let Some(current) = self.env.lookup(name).cloned() else {
            tracing::debug!(name, "convert on an unbound variable");
            return;
        };
        match to {
            Conversion::Text => self.env.set(name, Value::Text(current.to_string())),
            Conversion::Number => {
                let converted = match &current {
                    Value::Number(_) => Some(current.clone()),
                    Value::Bool(b) => Some(Value::Number(if *b { 1.0 } else { 0.0 })),
                    Value::Text(text) => parse_leading_number(text).map(Value::Number),
                };
                match converted {
                    Some(value) => self.env.set(name, value),
                    None => self.emit(OutputEvent::Diagnostic(format!(
                        "No se puede convertir '{current}' a número"
                    ))),
                }
            }
        }
    }

    fn run_device(&mut self, request: DeviceRequest) -> RuntimeResult<()> {
        tracing::debug!(%request, "awaiting device");
        match request {
            DeviceRequest::CapturePhoto => {
                let pending = self.host.capture_photo();
                if let Some(photo) = self.suspend(pending)? {
                    self.env.set(PHOTO_VAR, Value::Text(photo));
                    self.emit(OutputEvent::Text(format!(
                        "Foto tomada y guardada en '{PHOTO_VAR}'"
                    )));
                }
            }
            DeviceRequest::Locate => {
                let pending = self.host.locate();
                if let Some(location) = self.suspend(pending)? {
                    self.env.set(LATITUDE_VAR, Value::Number(location.latitude));
                    self.env.set(LONGITUDE_VAR, Value::Number(location.longitude));
                    self.emit(OutputEvent::Text(format!(
                        "Ubicación: {:.6}, {:.6}",
                        location.latitude, location.longitude
                    )));
                }
            }
            DeviceRequest::Http { method, url, body } => {
                let pending = self.host.http(HttpRequest {
                    method: method.clone(),
                    url: url.clone(),
                    body,
                });
                if let Some(status) = self.suspend(pending)? {
                    self.env
                        .set(HTTP_STATUS_VAR, Value::Number(f64::from(status)));
                    self.emit(OutputEvent::Text(format!("HTTP {method} {url}: {status}")));
                }
            }
        }
        Ok(())
    }

    /// Awaits a suspension point. A device failure becomes a diagnostic
    /// on the output channel and the run continues.
    fn suspend<T>(&mut self, pending: Suspension<T>) -> RuntimeResult<Option<T>> {
        match self.suspensions.block_on(pending)? {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(error = %err, "suspension point failed");
                self.emit(OutputEvent::Diagnostic(err.to_string()));
                Ok(None)
            }
        }
    }

    fn emit(&mut self, event: OutputEvent) {
        self.host.display(&event);
        self.transcript.push(&event);
    }
}

fn loop_count(value: &Value) -> Option<usize> {
    let n = value.to_number();
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 {
        Some(n as usize)
    } else {
        None
    }
}
