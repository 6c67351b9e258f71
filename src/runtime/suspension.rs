//! Driver side of the suspension points.
//!
//! Device and network commands hand back a boxed future; the interpreter
//! awaits it here, on a current-thread runtime, before advancing to the
//! next line. Nothing else in the crate blocks on a future, so side effects
//! stay in program order. There is no timeout: a host that never answers
//! stalls the run.

use crate::runtime::{
    error::{DeviceError, RuntimeError, RuntimeResult},
    host::Suspension,
};
use tokio::runtime::{Builder, Runtime};

#[derive(Default)]
pub struct SuspensionRuntime {
    runtime: Option<Runtime>,
}

impl SuspensionRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awaits one suspension to completion. The outer error is reserved
    /// for the runtime itself failing to start; device failures come back
    /// in the inner result so the caller can report them and carry on.
    pub fn block_on<T>(&mut self, suspension: Suspension<T>) -> RuntimeResult<Result<T, DeviceError>> {
        let runtime = self.runtime()?;
        Ok(runtime.block_on(suspension))
    }

    fn runtime(&mut self) -> RuntimeResult<&Runtime> {
        if self.runtime.is_none() {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|err| RuntimeError::Suspension {
                    message: err.to_string(),
                })?;
            self.runtime = Some(runtime);
        }
        self.runtime.as_ref().ok_or_else(|| RuntimeError::Suspension {
            message: "runtime missing after initialization".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awaits_ready_suspensions() {
        let mut runtime = SuspensionRuntime::new();
        let ok: Suspension<u16> = Box::pin(async { Ok(200) });
        assert_eq!(runtime.block_on(ok).expect("runtime"), Ok(200));
        let failed: Suspension<u16> =
            Box::pin(async { Err(DeviceError::Unavailable { feature: "cámara" }) });
        assert_eq!(
            runtime.block_on(failed).expect("runtime"),
            Err(DeviceError::Unavailable { feature: "cámara" })
        );
    }

    #[test]
    fn spawned_blocking_work_completes() {
        let mut runtime = SuspensionRuntime::new();
        let work: Suspension<u16> = Box::pin(async {
            match tokio::task::spawn_blocking(|| 7u16).await {
                Ok(value) => Ok(value),
                Err(err) => Err(DeviceError::Network(err.to_string())),
            }
        });
        assert_eq!(runtime.block_on(work).expect("runtime"), Ok(7));
    }
}
