//! YAML documents → parse events.
//!
//! A model file is a stream of YAML documents. Document boundaries come from
//! the `yaml-rust2` event stream, so `---` lines inside block scalars and
//! `...` end markers behave as YAML defines them. Each document is then
//! parsed with `marked-yaml`, which keeps source markers on every node, and
//! the node tree is flattened into events in document order.

use marked_yaml::Node;
use yaml_rust2::parser::{Event as YamlEvent, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::Marker as YamlMarker;

use super::{Event, EventKind};
use crate::base::{FileId, Location, Position, Span};
use crate::error::ModelException;

/// The whole lines of a file that hold one document.
struct RawDocument {
    /// 0-indexed line of the first line in the file.
    first_line: usize,
    text: String,
}

impl RawDocument {
    fn is_blank(&self) -> bool {
        self.text.lines().enumerate().all(|(index, line)| {
            let line = match line.strip_prefix("---") {
                Some(rest) if index == 0 => rest,
                _ => line,
            };
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        })
    }
}

/// Collects `(start, end)` markers of every document in the stream.
#[derive(Default)]
struct DocumentBounds {
    start: Option<YamlMarker>,
    documents: Vec<(YamlMarker, YamlMarker)>,
}

impl MarkedEventReceiver for DocumentBounds {
    fn on_event(&mut self, event: YamlEvent, mark: YamlMarker) {
        match event {
            YamlEvent::DocumentStart => self.start = Some(mark),
            YamlEvent::DocumentEnd => {
                if let Some(start) = self.start.take() {
                    self.documents.push((start, mark));
                }
            }
            _ => {}
        }
    }
}

fn split_documents(
    file: FileId,
    file_name: &str,
    source: &str,
) -> Result<Vec<RawDocument>, ModelException> {
    let mut bounds = DocumentBounds::default();
    Parser::new_from_str(source)
        .load(&mut bounds, true)
        .map_err(|e| {
            // yaml-rust2 lines are 1-based, columns 0-based.
            let mark = e.marker();
            let location = Location::point(file, mark.line().saturating_sub(1), mark.col());
            ModelException::new(file_name, location, format!("Document YAML invalide : {e}"))
        })?;

    let lines: Vec<&str> = source.lines().collect();
    let mut documents = Vec::with_capacity(bounds.documents.len());
    for (start, end) in bounds.documents {
        let first_line = start.line().saturating_sub(1);
        // An end marker at column 0 sits on the next `---`/`...` line or past the last newline.
        let last_line = if end.col() == 0 {
            end.line().saturating_sub(1)
        } else {
            end.line()
        };
        let last_line = last_line.min(lines.len()).max(first_line);
        let mut text = String::new();
        for line in &lines[first_line..last_line] {
            text.push_str(line);
            text.push('\n');
        }
        documents.push(RawDocument { first_line, text });
    }

    documents.retain(|doc| !doc.is_blank());
    Ok(documents)
}

/// Tokenize a model file into parse events.
///
/// An empty file (or one holding only separators and comments) produces
/// just `StreamStart`/`StreamEnd`.
pub fn tokenize(file: FileId, file_name: &str, source: &str) -> Result<Vec<Event>, ModelException> {
    let mut events = vec![Event::new(
        EventKind::StreamStart,
        Location::point(file, 0, 0),
    )];

    for document in split_documents(file, file_name, source)? {
        let start = Location::point(file, document.first_line, 0);
        let node = marked_yaml::parse_yaml(file.index(), &document.text).map_err(|e| {
            ModelException::new(file_name, start, format!("Document YAML invalide : {e}"))
        })?;

        events.push(Event::new(EventKind::DocumentStart, start));
        emit_node(&node, file, document.first_line, &mut events);
        let end = events.last().map(|e| e.location).unwrap_or(start);
        events.push(Event::new(EventKind::DocumentEnd, end));
    }

    let last_line = source.lines().count();
    events.push(Event::new(
        EventKind::StreamEnd,
        Location::point(file, last_line, 0),
    ));
    Ok(events)
}

fn emit_node(node: &Node, file: FileId, line_offset: usize, events: &mut Vec<Event>) {
    match node {
        Node::Scalar(scalar) => {
            let value = scalar.as_str().to_string();
            let location = scalar_location(scalar.span(), &value, file, line_offset);
            events.push(Event::new(EventKind::Scalar(value), location));
        }
        Node::Mapping(mapping) => {
            let location = node_location(mapping.span(), file, line_offset);
            events.push(Event::new(EventKind::MappingStart, location));
            for (key, value) in mapping.iter() {
                let key_text = key.as_str().to_string();
                let key_location = scalar_location(key.span(), &key_text, file, line_offset);
                events.push(Event::new(EventKind::Scalar(key_text), key_location));
                emit_node(value, file, line_offset, events);
            }
            let end = end_location(mapping.span(), events, location, line_offset);
            events.push(Event::new(EventKind::MappingEnd, end));
        }
        Node::Sequence(sequence) => {
            let location = node_location(sequence.span(), file, line_offset);
            events.push(Event::new(EventKind::SequenceStart, location));
            for item in sequence.iter() {
                emit_node(item, file, line_offset, events);
            }
            let end = end_location(sequence.span(), events, location, line_offset);
            events.push(Event::new(EventKind::SequenceEnd, end));
        }
    }
}

fn to_position(marker: &marked_yaml::Marker, line_offset: usize) -> Position {
    // Markers are 1-based.
    Position::new(
        line_offset + marker.line().saturating_sub(1),
        marker.column().saturating_sub(1),
    )
}

fn node_location(span: &marked_yaml::Span, file: FileId, line_offset: usize) -> Location {
    let start = span
        .start()
        .map(|m| to_position(m, line_offset))
        .unwrap_or(Position::new(line_offset, 0));
    let end = span
        .end()
        .map(|m| to_position(m, line_offset))
        .unwrap_or(start);
    Location::new(file, Span::new(start, end))
}

fn scalar_location(
    span: &marked_yaml::Span,
    value: &str,
    file: FileId,
    line_offset: usize,
) -> Location {
    let mut location = node_location(span, file, line_offset);
    if span.end().is_none() {
        let start = location.span.start;
        location.span.end = Position::new(start.line, start.column + value.chars().count());
    }
    location
}

/// Closing events sit at the node's end marker, or after the last child.
fn end_location(
    span: &marked_yaml::Span,
    events: &[Event],
    fallback: Location,
    line_offset: usize,
) -> Location {
    match (span.end(), events.last()) {
        (Some(marker), _) => Location::new(fallback.file, Span::at(to_position(marker, line_offset))),
        (None, Some(last)) => Location::new(last.location.file, Span::at(last.location.span.end)),
        (None, None) => fallback,
    }
}
