#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- transport errors ------------------------------------------
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("malformed rpc message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("connection to debugger closed")]
    ConnectionClosed,
    #[error("unexpected rpc response id {got} (expected {expected})")]
    ResponseMismatch { expected: u64, got: u64 },

    // --------------------------------- request errors --------------------------------------------
    #[error("{method}: {message}")]
    Rpc {
        method: &'static str,
        message: String,
    },
    #[error("{0} returned an empty result")]
    EmptyResult(&'static str),
    #[error("invalid instruction encoding: {0}")]
    InstructionBytes(#[from] data_encoding::DecodeError),
}

impl Error {
    /// Return true if the connection to the debugger can't be used anymore.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::IO(_) => true,
            Error::Json(_) => true,
            Error::ConnectionClosed => true,
            Error::ResponseMismatch { .. } => true,

            Error::Rpc { .. } => false,
            Error::EmptyResult(_) => false,
            Error::InstructionBytes(_) => false,
        }
    }
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "dlvview", "{:#}", e);
                None
            }
        }
    };
    ($log_fn: path, $res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "dlvview", concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!(log::warn, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::warn, $res, $msg)
    };
}

/// Transforms `Result` into `Option` and put error into debug logs if it occurs.
#[macro_export]
macro_rules! muted_error {
    ($res: expr) => {
        $crate::_error!(log::debug, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::debug, $res, $msg)
    };
}
