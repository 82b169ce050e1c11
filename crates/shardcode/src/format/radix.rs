use super::{CodeParser, DecodeError, Formatter, RadixError};

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NO_VALUE: u8 = 255;
/// `u64::MAX` in base 2 is the longest possible code.
const MAX_DIGITS: usize = 64;

/// Lookup table for decoding: byte -> digit value
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Positional formatter over the alphabet `0-9a-zA-Z`, in any base from 2 to
/// 62.
///
/// Digits above 9 are lower-case letters first, then upper-case, so bases up
/// to 36 read like conventional hexadecimal-style output and base 62 uses
/// the whole alphabet. Codes have no padding; `0` formats as `"0"`.
///
/// # Example
/// ```
/// use shardcode::{CodeParser, Formatter, Radix};
///
/// let code = Radix::BASE62.format(1_000_000_000);
/// assert_eq!(code, "15FTGg");
/// assert_eq!(Radix::BASE62.parse(&code), Ok(1_000_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radix {
    base: u64,
}

impl Default for Radix {
    fn default() -> Self {
        Self::BASE62
    }
}

impl Radix {
    /// Digits, lower-case, then upper-case letters.
    pub const BASE62: Self = Self { base: 62 };
    /// Digits and lower-case letters.
    pub const BASE36: Self = Self { base: 36 };
    pub const DECIMAL: Self = Self { base: 10 };

    /// # Errors
    ///
    /// Returns [`RadixError::Unsupported`] unless `2 <= base <= 62`.
    pub const fn new(base: u32) -> Result<Self, RadixError> {
        if base < 2 || base > 62 {
            return Err(RadixError::Unsupported(base));
        }
        Ok(Self { base: base as u64 })
    }

    pub const fn base(&self) -> u32 {
        self.base as u32
    }

    /// Writes the digits of `code` into the tail of `buf`, returning where
    /// they start.
    fn encode_to_buf(&self, mut code: u64, buf: &mut [u8; MAX_DIGITS]) -> usize {
        let mut start = MAX_DIGITS;
        loop {
            start -= 1;
            buf[start] = ALPHABET[(code % self.base) as usize];
            code /= self.base;
            if code == 0 {
                return start;
            }
        }
    }
}

impl Formatter for Radix {
    fn format(&self, code: u64) -> String {
        let mut buf = [0_u8; MAX_DIGITS];
        let start = self.encode_to_buf(code, &mut buf);
        buf[start..].iter().map(|&b| char::from(b)).collect()
    }
}

impl CodeParser for Radix {
    fn parse(&self, code: &str) -> Result<u64, DecodeError> {
        if code.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut acc = 0_u64;
        for (index, byte) in code.bytes().enumerate() {
            let digit = u64::from(LOOKUP[byte as usize]);
            if digit >= self.base {
                return Err(DecodeError::InvalidDigit { byte, index });
            }
            acc = acc
                .checked_mul(self.base)
                .and_then(|acc| acc.checked_add(digit))
                .ok_or(DecodeError::Overflow)?;
        }

        Ok(acc)
    }
}
