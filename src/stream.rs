//! Incremental decoding of a top-level JSON array.
//!
//! Elements are pulled one at a time through serde's [`SeqAccess`], so only
//! the element being decoded is held in memory. The first bad element stops
//! decoding.

use serde::de::{DeserializeOwned, SeqAccess, Visitor};
use serde::Deserializer as _;
use std::fmt;
use std::io::{BufReader, Read};
use std::marker::PhantomData;

use crate::errors::{AlertmanagerError, Result};

/// Single-pass decoder for a JSON array read from a byte stream
///
/// # Example
///
/// ```rust
/// use alertmanager_stream::ArrayDecoder;
///
/// let names: Vec<String> = ArrayDecoder::new(&br#"["a", "b"]"#[..]).decode_all().unwrap();
/// assert_eq!(names, vec!["a", "b"]);
/// ```
pub struct ArrayDecoder<R> {
    reader: R,
}

#[derive(Debug, Default)]
struct Progress {
    opened: bool,
    decoded: usize,
}

impl<R: Read> ArrayDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Decode elements one by one, handing each to `on_element` as soon as
    /// it is complete
    ///
    /// Returns the number of decoded elements. On error, elements already
    /// handed out were valid on their own but the array as a whole is not.
    ///
    /// # Errors
    ///
    /// - [`AlertmanagerError::NotAnArray`] if the top-level value is not an array
    /// - [`AlertmanagerError::MalformedElement`] if an element fails to decode
    /// - [`AlertmanagerError::TrailingData`] if data follows the closing `]`
    /// - [`AlertmanagerError::Decompression`] if reading the stream fails
    pub fn for_each<T, F>(self, mut on_element: F) -> Result<usize>
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        let mut de = serde_json::Deserializer::from_reader(BufReader::new(self.reader));
        let mut progress = Progress::default();

        let visitor = ElementVisitor {
            progress: &mut progress,
            on_element: &mut on_element,
            marker: PhantomData,
        };

        if let Err(err) = (&mut de).deserialize_seq(visitor) {
            return Err(classify(err, &progress));
        }

        de.end().map_err(|err| {
            if err.is_io() {
                AlertmanagerError::Decompression(err.into())
            } else {
                AlertmanagerError::TrailingData(err)
            }
        })?;

        Ok(progress.decoded)
    }

    /// Decode the whole array into a vector
    ///
    /// Either every element is returned or an error is, never a prefix.
    pub fn decode_all<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.for_each(|item| items.push(item))?;
        Ok(items)
    }
}

fn classify(err: serde_json::Error, progress: &Progress) -> AlertmanagerError {
    if err.is_io() {
        AlertmanagerError::Decompression(err.into())
    } else if progress.opened {
        AlertmanagerError::MalformedElement {
            index: progress.decoded,
            source: err,
        }
    } else {
        AlertmanagerError::NotAnArray(err)
    }
}

struct ElementVisitor<'a, T, F> {
    progress: &'a mut Progress,
    on_element: &'a mut F,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T, F> Visitor<'de> for ElementVisitor<'_, T, F>
where
    T: DeserializeOwned,
    F: FnMut(T),
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON array")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.progress.opened = true;
        while let Some(element) = seq.next_element::<T>()? {
            (self.on_element)(element);
            self.progress.decoded += 1;
        }
        Ok(())
    }
}
