// Scoped camera access: a session owns an open capture stream and always stops it.
use std::sync::Arc;
use thiserror::Error;

use shared::models::Attachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Front camera.
    User,
    #[default]
    Environment,
}

impl Facing {
    pub fn toggled(self) -> Self {
        match self {
            Facing::User => Facing::Environment,
            Facing::Environment => Facing::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Permissão para usar a câmera negada. Libere o acesso nas configurações e tente novamente.")]
    PermissionDenied,
    #[error("Nenhuma câmera encontrada neste dispositivo.")]
    NoDevice,
    #[error("Este dispositivo não oferece acesso à câmera. Use o envio de arquivo.")]
    Unsupported,
    #[error("Falha ao capturar a imagem: {0}")]
    Capture(String),
}

/// An open video stream. `stop` releases the device and must be idempotent.
pub trait CaptureStream: Send {
    fn facing(&self) -> Facing;
    /// Grabs the current frame as JPEG bytes.
    fn capture_jpeg(&mut self) -> Result<Vec<u8>, CameraError>;
    fn stop(&mut self);
}

pub trait CameraBackend: Send + Sync {
    fn open(&self, facing: Facing) -> Result<Box<dyn CaptureStream>, CameraError>;
}

/// Backend for builds without camera support; every open is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCameraBackend;

impl CameraBackend for NoCameraBackend {
    fn open(&self, _facing: Facing) -> Result<Box<dyn CaptureStream>, CameraError> {
        Err(CameraError::Unsupported)
    }
}

pub struct CameraSession {
    backend: Arc<dyn CameraBackend>,
    stream: Option<Box<dyn CaptureStream>>,
    facing: Facing,
}

impl CameraSession {
    pub fn open(backend: Arc<dyn CameraBackend>, facing: Facing) -> Result<Self, CameraError> {
        let stream = backend.open(facing).map_err(|e| {
            tracing::warn!(?facing, error = %e, "Camera open failed");
            e
        })?;
        tracing::debug!(?facing, "Camera stream opened");
        Ok(CameraSession {
            backend,
            stream: Some(stream),
            facing,
        })
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(facing = ?self.facing, "Camera stream stopped");
        }
    }

    /// Stops the current stream, then opens the other camera. When the new
    /// stream cannot be opened the session is left inactive.
    pub fn switch(&mut self) -> Result<(), CameraError> {
        self.release();
        let next = self.facing.toggled();
        let stream = self.backend.open(next)?;
        self.stream = Some(stream);
        self.facing = next;
        Ok(())
    }

    /// Takes a photo and closes the session whatever the outcome.
    pub fn capture_and_close(mut self) -> Result<Attachment, CameraError> {
        let result = match self.stream.as_mut() {
            Some(stream) => stream.capture_jpeg(),
            None => Err(CameraError::Capture("câmera inativa".to_string())),
        };
        self.release();
        result.map(|bytes| Attachment::inline("image/jpeg", bytes))
    }

    pub fn close(mut self) {
        self.release();
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}
