//! Event: discrete, typed, timestamped message with a variable payload
//!
//! An event carries one byte payload whose shape is given by its
//! [`EventType`]:
//!
//! | Type | Payload | Element size |
//! |------|---------|--------------|
//! | Empty | none, `tot` is always 0 | - |
//! | Undefined | raw bytes | - |
//! | String | bytes up to a terminating NUL, usually UTF-8 | 1 |
//! | Tuple | `f32` values | 4 |
//! | Map | `(id: u32, value: f32)` pairs | 8 |
//!
//! The payload follows the same adjust policy as streams: shrinking keeps
//! the allocation, growing reallocates exactly and copies the old logical
//! bytes. Typed accessors check `tot % element_size == 0` before exposing a
//! view, and [`Event::adjust`] refuses sizes that would break that rule.
//! An empty event never holds payload bytes.
//!
//! Sender and event names are [`StringId`] handles resolved through a
//! caller-supplied [`StringResolver`].

use crate::stream::AdjustOutcome;
use byteorder::{ByteOrder, NativeEndian};
use serde::{Deserialize, Serialize};
use ssi_core::{ByteBuffer, Error, Limits, Result, StringId, StringResolver};
use std::fmt;
use tracing::warn;

/// Payload shape discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Raw bytes of unknown shape
    #[default]
    Undefined,
    /// No payload
    Empty,
    /// NUL-terminated text
    String,
    /// Array of `f32`
    Tuple,
    /// Array of id/value pairs
    Map,
}

impl EventType {
    /// All event types (for iteration)
    pub const ALL: [EventType; 5] = [
        EventType::Undefined,
        EventType::Empty,
        EventType::String,
        EventType::Tuple,
        EventType::Map,
    ];

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            EventType::Undefined => "undefined",
            EventType::Empty => "empty",
            EventType::String => "string",
            EventType::Tuple => "tuple",
            EventType::Map => "map",
        }
    }

    /// Parse from canonical name (case-sensitive)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Size of one payload element, `None` where any size is allowed
    pub const fn element_size(&self) -> Option<usize> {
        match self {
            EventType::Tuple => Some(TUPLE_SIZE),
            EventType::Map => Some(MapEntry::SIZE),
            _ => None,
        }
    }

    /// Stable numeric id
    pub const fn to_byte(&self) -> u8 {
        match self {
            EventType::Undefined => 0,
            EventType::Empty => 1,
            EventType::String => 2,
            EventType::Tuple => 3,
            EventType::Map => 4,
        }
    }

    /// Decode a numeric id
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(EventType::Undefined),
            1 => Some(EventType::Empty),
            2 => Some(EventType::String),
            3 => Some(EventType::Tuple),
            4 => Some(EventType::Map),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an event is final or part of a span still being updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventState {
    /// Finalised, standalone record
    #[default]
    Completed,
    /// Part of an ongoing span; more updates follow
    Continued,
}

/// Key grouping related events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GlueId(pub u32);

impl GlueId {
    /// Event belongs to no group
    pub const UNGROUPED: GlueId = GlueId(0);

    /// Whether the event belongs to a group
    pub const fn is_grouped(&self) -> bool {
        self.0 != 0
    }
}

const TUPLE_SIZE: usize = 4;

/// One id/value pair of a map payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapEntry {
    /// Interned key
    pub id: StringId,
    /// Value for the key
    pub value: f32,
}

impl MapEntry {
    /// Encoded size in bytes
    pub const SIZE: usize = 8;

    /// Create an entry
    pub fn new(id: StringId, value: f32) -> Self {
        Self { id, value }
    }

    fn read(bytes: &[u8]) -> Self {
        Self {
            id: StringId::from_raw(NativeEndian::read_u32(&bytes[..4])),
            value: NativeEndian::read_f32(&bytes[4..8]),
        }
    }

    fn write(&self, bytes: &mut [u8]) {
        NativeEndian::write_u32(&mut bytes[..4], self.id.as_raw());
        NativeEndian::write_f32(&mut bytes[4..8], self.value);
    }
}

/// Typed view of an event payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// Raw bytes of an undefined event
    Raw(&'a [u8]),
    /// No payload
    Empty,
    /// Bytes of a string event up to the terminating NUL
    Text(&'a [u8]),
    /// Tuple values
    Tuple(Vec<f32>),
    /// Map entries
    Map(Vec<MapEntry>),
}

/// Discrete, typed, timestamped message
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventType,
    /// Who emitted the event
    pub sender_id: StringId,
    /// What happened
    pub event_id: StringId,
    /// Onset in milliseconds
    pub time: u32,
    /// Duration in milliseconds
    pub dur: u32,
    /// Confidence in `[0, 1]`
    pub prob: f32,
    /// Completed or continued
    pub state: EventState,
    /// Group of related events
    pub glue_id: GlueId,
    payload: ByteBuffer,
}

impl Default for Event {
    /// The destroyed/empty event
    fn default() -> Self {
        Self {
            kind: EventType::Undefined,
            sender_id: StringId::INVALID,
            event_id: StringId::INVALID,
            time: 0,
            dur: 0,
            prob: 0.0,
            state: EventState::Completed,
            glue_id: GlueId::UNGROUPED,
            payload: ByteBuffer::new(),
        }
    }
}

fn check_payload_size(kind: EventType, tot: usize) -> Result<()> {
    if kind == EventType::Empty && tot > 0 {
        return Err(Error::InvalidData(format!(
            "empty event cannot carry {} payload bytes",
            tot
        )));
    }
    match kind.element_size() {
        Some(element) if tot % element != 0 => Err(Error::PayloadMisaligned { tot, element }),
        _ => Ok(()),
    }
}

impl Event {
    /// Create an event with a zeroed payload of `tot` bytes
    ///
    /// Probability starts at 1, state at completed, ungrouped.
    ///
    /// # Panics
    ///
    /// Panics if `tot` is not a whole number of elements for `kind`, or
    /// if an empty event is given payload bytes.
    pub fn new(
        kind: EventType,
        sender_id: StringId,
        event_id: StringId,
        time: u32,
        dur: u32,
        tot: usize,
    ) -> Self {
        if let Err(e) = check_payload_size(kind, tot) {
            panic!("invalid {} event payload: {}", kind, e);
        }
        Self {
            kind,
            sender_id,
            event_id,
            time,
            dur,
            prob: 1.0,
            state: EventState::Completed,
            glue_id: GlueId::UNGROUPED,
            payload: ByteBuffer::zeroed(tot),
        }
    }

    /// Create an event after validating its payload size against `limits`
    pub fn try_new(
        limits: &Limits,
        kind: EventType,
        sender_id: StringId,
        event_id: StringId,
        time: u32,
        dur: u32,
        tot: usize,
    ) -> Result<Self> {
        limits.validate_event(tot)?;
        check_payload_size(kind, tot)?;
        Ok(Self::new(kind, sender_id, event_id, time, dur, tot))
    }

    /// Event without payload
    pub fn empty(sender_id: StringId, event_id: StringId, time: u32, dur: u32) -> Self {
        Self::new(EventType::Empty, sender_id, event_id, time, dur, 0)
    }

    /// Event carrying `text`
    pub fn string(sender_id: StringId, event_id: StringId, time: u32, dur: u32, text: &str) -> Self {
        let mut event = Self::new(EventType::String, sender_id, event_id, time, dur, 0);
        event.set_string(text);
        event
    }

    /// Event carrying tuple values
    pub fn tuple(sender_id: StringId, event_id: StringId, time: u32, dur: u32, values: &[f32]) -> Self {
        let mut event = Self::new(EventType::Tuple, sender_id, event_id, time, dur, 0);
        event.set_tuple(values);
        event
    }

    /// Event carrying map entries
    pub fn map(
        sender_id: StringId,
        event_id: StringId,
        time: u32,
        dur: u32,
        entries: &[MapEntry],
    ) -> Self {
        let mut event = Self::new(EventType::Map, sender_id, event_id, time, dur, 0);
        event.set_map(entries);
        event
    }

    /// Set the confidence
    pub fn with_prob(mut self, prob: f32) -> Self {
        self.prob = prob;
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: EventState) -> Self {
        self.state = state;
        self
    }

    /// Set the group
    pub fn with_glue(mut self, glue_id: GlueId) -> Self {
        self.glue_id = glue_id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Payload shape
    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// Logical payload size in bytes
    pub fn tot(&self) -> usize {
        self.payload.len()
    }

    /// Allocated payload size in bytes
    pub fn tot_real(&self) -> usize {
        self.payload.capacity()
    }

    /// Raw logical payload
    pub fn bytes(&self) -> &[u8] {
        self.payload.as_slice()
    }

    /// Raw logical payload, mutable
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.payload.as_mut_slice()
    }

    /// Underlying storage
    pub fn buffer(&self) -> &ByteBuffer {
        &self.payload
    }

    /// End of the event in milliseconds
    pub fn end(&self) -> u32 {
        self.time.saturating_add(self.dur)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Resize the payload to `new_tot` bytes
    ///
    /// # Errors
    ///
    /// `PayloadMisaligned` if `new_tot` is not a whole number of tuple or
    /// map elements, `InvalidData` if `new_tot > 0` on an empty event; the
    /// event is untouched.
    pub fn adjust(&mut self, new_tot: usize) -> Result<AdjustOutcome> {
        if let Err(e) = check_payload_size(self.kind, new_tot) {
            warn!(kind = %self.kind, tot = new_tot, "event adjust rejected: {}", e);
            return Err(e);
        }
        if new_tot == self.payload.len() {
            return Ok(AdjustOutcome::Unchanged);
        }
        Ok(if self.payload.resize(new_tot) {
            AdjustOutcome::Reallocated
        } else {
            AdjustOutcome::InPlace
        })
    }

    /// Overwrite this event with `source`
    ///
    /// Scalar fields are copied. The payload is resized to `source.tot()`
    /// under the adjust policy and filled from `source`; an empty source
    /// payload frees this one.
    pub fn copy_from(&mut self, source: &Event) {
        self.kind = source.kind;
        self.sender_id = source.sender_id;
        self.event_id = source.event_id;
        self.time = source.time;
        self.dur = source.dur;
        self.prob = source.prob;
        self.state = source.state;
        self.glue_id = source.glue_id;
        if source.tot() == 0 {
            self.payload.release();
        } else {
            self.payload.resize(source.tot());
            self.payload.as_mut_slice().copy_from_slice(source.bytes());
        }
    }

    /// Free the payload and reset every field to its empty value
    pub fn destroy(&mut self) {
        *self = Event::default();
    }

    // =========================================================================
    // Typed payload
    // =========================================================================

    fn expect_kind(&self, expected: EventType) -> Result<()> {
        if self.kind != expected {
            return Err(Error::PayloadType {
                expected: expected.name(),
                actual: self.kind.name(),
            });
        }
        check_payload_size(self.kind, self.tot())
    }

    /// Bytes of a string event, up to the first NUL
    ///
    /// No encoding is assumed; producers may write Latin-1 or other
    /// single-byte text.
    pub fn text_bytes(&self) -> Result<&[u8]> {
        self.expect_kind(EventType::String)?;
        let bytes = self.bytes();
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Ok(&bytes[..end])
    }

    /// Text of a string event, up to the first NUL
    ///
    /// # Errors
    ///
    /// `InvalidData` if the bytes are not UTF-8; [`Event::text_bytes`]
    /// still reads them.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.text_bytes()?)
            .map_err(|e| Error::InvalidData(format!("string payload is not UTF-8: {}", e)))
    }

    /// Values of a tuple event
    pub fn tuple_values(&self) -> Result<Vec<f32>> {
        self.expect_kind(EventType::Tuple)?;
        Ok(self
            .bytes()
            .chunks_exact(TUPLE_SIZE)
            .map(NativeEndian::read_f32)
            .collect())
    }

    /// Entries of a map event
    pub fn map_entries(&self) -> Result<Vec<MapEntry>> {
        self.expect_kind(EventType::Map)?;
        Ok(self
            .bytes()
            .chunks_exact(MapEntry::SIZE)
            .map(MapEntry::read)
            .collect())
    }

    /// Typed view of the payload, chosen by the event type
    pub fn payload(&self) -> Result<Payload<'_>> {
        match self.kind {
            EventType::Undefined => Ok(Payload::Raw(self.bytes())),
            EventType::Empty => Ok(Payload::Empty),
            EventType::String => self.text_bytes().map(Payload::Text),
            EventType::Tuple => self.tuple_values().map(Payload::Tuple),
            EventType::Map => self.map_entries().map(Payload::Map),
        }
    }

    /// Make this a string event holding `text`
    pub fn set_string(&mut self, text: &str) {
        self.set_text_bytes(text.as_bytes());
    }

    /// Make this a string event holding `text` in any single-byte encoding
    ///
    /// The payload ends at the first NUL, so bytes after an embedded NUL
    /// are stored but not read back.
    pub fn set_text_bytes(&mut self, text: &[u8]) {
        self.kind = EventType::String;
        self.payload.resize(text.len() + 1);
        let bytes = self.payload.as_mut_slice();
        bytes[..text.len()].copy_from_slice(text);
        bytes[text.len()] = 0;
    }

    /// Make this a tuple event holding `values`
    pub fn set_tuple(&mut self, values: &[f32]) {
        self.kind = EventType::Tuple;
        self.payload.resize(values.len() * TUPLE_SIZE);
        for (v, chunk) in values
            .iter()
            .zip(self.payload.as_mut_slice().chunks_exact_mut(TUPLE_SIZE))
        {
            NativeEndian::write_f32(chunk, *v);
        }
    }

    /// Make this a map event holding `entries`
    pub fn set_map(&mut self, entries: &[MapEntry]) {
        self.kind = EventType::Map;
        self.payload.resize(entries.len() * MapEntry::SIZE);
        for (entry, chunk) in entries
            .iter()
            .zip(self.payload.as_mut_slice().chunks_exact_mut(MapEntry::SIZE))
        {
            entry.write(chunk);
        }
    }

    // =========================================================================
    // Transport records
    // =========================================================================

    /// Self-contained record with every handle resolved to its name
    ///
    /// Handles the resolver does not know become `None`. String payloads
    /// that are not UTF-8 travel as [`EventData::TextBytes`].
    pub fn to_record<R: StringResolver + ?Sized>(&self, resolver: &R) -> Result<EventRecord> {
        let name = |id: StringId| resolver.resolve(id).map(str::to_string);
        let data = match self.payload()? {
            Payload::Raw(bytes) => EventData::Raw(bytes.to_vec()),
            Payload::Empty => EventData::Empty,
            Payload::Text(text) => match std::str::from_utf8(text) {
                Ok(text) => EventData::Text(text.to_string()),
                Err(_) => EventData::TextBytes(text.to_vec()),
            },
            Payload::Tuple(values) => EventData::Tuple(values),
            Payload::Map(entries) => EventData::Map(
                entries
                    .into_iter()
                    .map(|e| (name(e.id), e.value))
                    .collect(),
            ),
        };
        Ok(EventRecord {
            sender: name(self.sender_id),
            event: name(self.event_id),
            time: self.time,
            dur: self.dur,
            prob: self.prob,
            state: self.state,
            glue_id: self.glue_id,
            data,
        })
    }

    /// Rebuild an event from a record, interning its names
    pub fn from_record<R: StringResolver + ?Sized>(record: &EventRecord, resolver: &mut R) -> Self {
        let mut id = |name: &Option<String>| match name {
            Some(name) => resolver.intern(name),
            None => StringId::INVALID,
        };
        let sender_id = id(&record.sender);
        let event_id = id(&record.event);
        let mut event = Self::new(EventType::Empty, sender_id, event_id, record.time, record.dur, 0)
            .with_prob(record.prob)
            .with_state(record.state)
            .with_glue(record.glue_id);
        match &record.data {
            EventData::Raw(bytes) => {
                event.kind = EventType::Undefined;
                event.payload = ByteBuffer::from_slice(bytes);
            }
            EventData::Empty => {}
            EventData::Text(text) => event.set_string(text),
            EventData::TextBytes(text) => event.set_text_bytes(text),
            EventData::Tuple(values) => event.set_tuple(values),
            EventData::Map(pairs) => {
                let entries: Vec<MapEntry> = pairs
                    .iter()
                    .map(|(name, value)| MapEntry::new(id(name), *value))
                    .collect();
                event.set_map(&entries);
            }
        }
        event
    }
}

/// Payload of an [`EventRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum EventData {
    /// Raw bytes
    Raw(Vec<u8>),
    /// No payload
    Empty,
    /// UTF-8 text
    Text(String),
    /// Text in another encoding, NUL excluded
    TextBytes(Vec<u8>),
    /// Tuple values
    Tuple(Vec<f32>),
    /// Map entries with resolved keys
    Map(Vec<(Option<String>, f32)>),
}

/// Transport form of an event, independent of any string table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Sender name
    pub sender: Option<String>,
    /// Event name
    pub event: Option<String>,
    /// Onset in milliseconds
    pub time: u32,
    /// Duration in milliseconds
    pub dur: u32,
    /// Confidence
    pub prob: f32,
    /// Completed or continued
    pub state: EventState,
    /// Group of related events
    pub glue_id: GlueId,
    /// Payload
    pub data: EventData,
}
