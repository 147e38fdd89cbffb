use crate::utils::error::Result;

/// Backing store for the serialized directory.
///
/// Implementations hold no open handles between calls.
pub trait Store {
    /// Raw stored bytes; `Ok(None)` when nothing has been stored yet.
    /// Decoding is left to the codec so one bad line cannot hide the rest.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the whole stored contents.
    fn write(&self, contents: &str) -> Result<()>;

    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}
