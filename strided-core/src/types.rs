use num_complex::Complex64;
use std::fmt;

/// Defines the closed set of scalar types a tensor can hold.
///
/// `None` is a sentinel tag: it names "no type" and is never the dtype of an
/// allocated buffer. Factories reject it with `UnsupportedDType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// No scalar type.
    None,
    /// Boolean type (true/false values).
    Bool,
    /// Unsigned 8-bit integer.
    U8,
    /// 32-bit integer type.
    I32,
    /// 64-bit floating-point type.
    F64,
    /// Complex number with two 64-bit float parts.
    C128,
}

impl DType {
    /// All concrete (allocatable) dtypes, narrowest first.
    pub const ALL: [DType; 5] = [DType::Bool, DType::U8, DType::I32, DType::F64, DType::C128];

    /// Size in bytes of one element. The sentinel has size 0.
    pub fn itemsize(&self) -> usize {
        match self {
            DType::None => 0,
            DType::Bool => std::mem::size_of::<bool>(),
            DType::U8 => std::mem::size_of::<u8>(),
            DType::I32 => std::mem::size_of::<i32>(),
            DType::F64 => std::mem::size_of::<f64>(),
            DType::C128 => std::mem::size_of::<Complex64>(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DType::None => "none",
            DType::Bool => "bool",
            DType::U8 => "uint8",
            DType::I32 => "int32",
            DType::F64 => "float64",
            DType::C128 => "complex128",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DType::None)
    }

    fn rank(self) -> u8 {
        match self {
            DType::None => 0,
            DType::Bool => 1,
            DType::U8 => 2,
            DType::I32 => 3,
            DType::F64 => 4,
            DType::C128 => 5,
        }
    }

    /// The wider of two dtypes under `bool < u8 < i32 < f64 < c128`.
    ///
    /// Used where values are only moved (concat, assignment targets).
    pub fn common(self, other: DType) -> DType {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }

    /// Output dtype of an arithmetic operation over `self` and `other`.
    ///
    /// The wider operand type; `bool` with `bool` stays `bool`.
    /// Must agree with the `Promote` table in `element.rs`.
    pub fn result_type(self, other: DType) -> DType {
        self.common(other)
    }

    /// Output dtype of `exp`/`log` over this dtype.
    pub fn float_type(self) -> DType {
        match self {
            DType::None => DType::None,
            DType::C128 => DType::C128,
            _ => DType::F64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single type-erased element value.
///
/// Used for fill values, element access and scalar extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    I32(i32),
    F64(f64),
    C128(Complex64),
}

impl Scalar {
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::Bool(_) => DType::Bool,
            Scalar::U8(_) => DType::U8,
            Scalar::I32(_) => DType::I32,
            Scalar::F64(_) => DType::F64,
            Scalar::C128(_) => DType::C128,
        }
    }

    /// Real value of the scalar. Complex values keep only their real part.
    pub fn to_f64(&self) -> f64 {
        match *self {
            Scalar::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Scalar::U8(v) => v as f64,
            Scalar::I32(v) => v as f64,
            Scalar::F64(v) => v,
            Scalar::C128(c) => c.re,
        }
    }

    pub fn to_c128(&self) -> Complex64 {
        match *self {
            Scalar::C128(c) => c,
            other => Complex64::new(other.to_f64(), 0.0),
        }
    }

    pub fn is_nonzero(&self) -> bool {
        match *self {
            Scalar::Bool(b) => b,
            Scalar::U8(v) => v != 0,
            Scalar::I32(v) => v != 0,
            Scalar::F64(v) => v != 0.0,
            Scalar::C128(c) => c.re != 0.0 || c.im != 0.0,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::U8(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::I32(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::F64(value)
    }
}

impl From<Complex64> for Scalar {
    fn from(value: Complex64) -> Self {
        Scalar::C128(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::C128(v) => write!(f, "{}", v),
        }
    }
}
