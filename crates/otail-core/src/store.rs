//! Store — classified messages partitioned by [`Kind`], indexed by display line.
//!
//! Each partition keeps its entries in arrival order together with the
//! contiguous range of global line numbers every message occupies in the
//! partition's flattened line list. The store is the single source of truth;
//! the session reads from it, never from the feed directly.
//!
//! With a retention cap the oldest messages of a partition are evicted right
//! after the `add` that overflowed it, and every surviving entry is re-based so
//! the first line of the partition is line 0 again.

use crate::types::{Kind, Message};
use std::num::NonZeroUsize;
use std::ops::Range;

/// A stored message and the `[start, end)` line range it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    message: Message,
    start: usize,
    end: usize,
}

impl Entry {
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// First global line of the message (inclusive).
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last global line of the message.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        self.range().contains(&line)
    }
}

/// What a call to [`MessageStore::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added {
    /// Partition the message went into.
    pub kind: Kind,
    /// Lines removed from the front of the partition by retention.
    pub evicted_lines: usize,
}

#[derive(Debug, Default)]
struct Partition {
    entries: Vec<Entry>,
    total: usize,
}

impl Partition {
    fn push(&mut self, message: Message) {
        let start = self.total;
        let end = start + message.line_count();
        self.entries.push(Entry { message, start, end });
        self.total = end;
    }

    /// Drop the oldest entries beyond `keep` and re-base the rest.
    fn compact(&mut self, keep: usize) -> usize {
        let excess = self.entries.len().saturating_sub(keep);
        if excess == 0 {
            return 0;
        }
        let shift = self.entries[excess].start;
        self.entries.drain(..excess);
        for entry in &mut self.entries {
            entry.start -= shift;
            entry.end -= shift;
        }
        self.total -= shift;
        shift
    }
}

/// Kind-partitioned message store. Not synchronised; owned by the UI loop.
#[derive(Debug, Default)]
pub struct MessageStore {
    partitions: [Partition; 3],
    retention: Option<NonZeroUsize>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that keeps at most `max_messages` messages per partition.
    pub fn with_retention(max_messages: NonZeroUsize) -> Self {
        Self { retention: Some(max_messages), ..Self::default() }
    }

    pub fn retention(&self) -> Option<NonZeroUsize> {
        self.retention
    }

    fn partition(&self, kind: Kind) -> &Partition {
        &self.partitions[kind.slot()]
    }

    /// Append a message to its partition, then apply retention.
    pub fn add(&mut self, message: Message) -> Added {
        let kind = message.kind().partition();
        let partition = &mut self.partitions[kind.slot()];
        debug_assert_eq!(
            partition.entries.last().map_or(0, Entry::end),
            partition.total,
            "partition line index out of step with its entries"
        );
        partition.push(message);

        let evicted_lines = match self.retention {
            Some(keep) => partition.compact(keep.get()),
            None => 0,
        };
        if evicted_lines > 0 {
            tracing::debug!(%kind, evicted_lines, "store: compacted partition");
        }
        Added { kind, evicted_lines }
    }

    /// Every line of `kind`'s partition, in order.
    pub fn lines_for(&self, kind: Kind) -> impl Iterator<Item = &str> + '_ {
        self.partition(kind)
            .entries
            .iter()
            .flat_map(|entry| entry.message.lines().iter().map(String::as_str))
    }

    pub fn total_lines(&self, kind: Kind) -> usize {
        self.partition(kind).total
    }

    pub fn entries(&self, kind: Kind) -> &[Entry] {
        &self.partition(kind).entries
    }

    pub fn message_count(&self, kind: Kind) -> usize {
        self.partition(kind).entries.len()
    }

    /// Position of the entry whose range contains `line`.
    ///
    /// Scans from the newest entry backwards, since lookups cluster near the
    /// tail.
    pub fn entry_index_at(&self, kind: Kind, line: usize) -> Option<usize> {
        let partition = self.partition(kind);
        if line >= partition.total {
            return None;
        }
        partition.entries.iter().rposition(|entry| entry.contains(line))
    }

    /// The entry owning global line `line` of `kind`, if any.
    pub fn entry_at(&self, kind: Kind, line: usize) -> Option<&Entry> {
        self.entry_index_at(kind, line)
            .map(|idx| &self.partition(kind).entries[idx])
    }

    /// Lines `range` of `kind`'s partition, each with its global index and
    /// owning entry. Finds the first entry by binary search, so the cost
    /// follows the window rather than the partition size.
    pub fn window(
        &self,
        kind: Kind,
        range: Range<usize>,
    ) -> impl Iterator<Item = (usize, &Entry, &str)> + '_ {
        let Range { start, end } = range;
        let entries = &self.partition(kind).entries;
        let first = entries.partition_point(|entry| entry.end <= start);
        entries[first..]
            .iter()
            .take_while(move |entry| entry.start < end)
            .flat_map(|entry| {
                entry
                    .message
                    .lines()
                    .iter()
                    .enumerate()
                    .map(move |(offset, text)| (entry.start + offset, entry, text.as_str()))
            })
            .skip_while(move |(idx, ..)| *idx < start)
            .take_while(move |(idx, ..)| *idx < end)
    }

    /// Text of global line `line` of `kind`.
    pub fn line(&self, kind: Kind, line: usize) -> Option<&str> {
        let entry = self.entry_at(kind, line)?;
        entry.message.lines().get(line - entry.start).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
