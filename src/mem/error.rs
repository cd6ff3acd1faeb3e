pub struct Error {
    code: ErrorCode,
    operation: &'static str,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::mem::Error::new($crate::mem::ErrorCode::$err)
    };
    ($err:ident, $op:expr) => {
        $crate::mem::Error::new($crate::mem::ErrorCode::$err).in_operation($op)
    };
    ($err:ident; $msg:expr) => {
        $crate::mem::Error::new($crate::mem::ErrorCode::$err).message($msg)
    };
    ($err:ident, $op:expr; $msg:expr) => {
        $crate::mem::Error::new($crate::mem::ErrorCode::$err)
            .in_operation($op)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            operation: "",
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn in_operation(&self, operation: &'static str) -> Error {
        debug_assert!(self.operation.is_empty());
        Error {
            code: self.code,
            operation,
            message: self.message,
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            operation: self.operation,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidAccess,
    InvalidRestore,
    LimitCheck,
    RangeCheck,
    StackUnderflow,
    TypeCheck,
    Unregistered,
    VmError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        match self {
            InvalidAccess => write!(f, "invalidaccess"),
            InvalidRestore => write!(f, "invalidrestore"),
            LimitCheck => write!(f, "limitcheck"),
            RangeCheck => write!(f, "rangecheck"),
            StackUnderflow => write!(f, "stackunderflow"),
            TypeCheck => write!(f, "typecheck"),
            Unregistered => write!(f, "unregistered"),
            VmError => write!(f, "VMerror"),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if !self.operation.is_empty() {
            suffix.push_str(&format!(" in {}", self.operation));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}

impl std::error::Error for Error {}
