use super::{Event, EventKind};
use crate::base::{Location, LocatedString};
use crate::error::ModelException;

/// Cursor over a file's parse events.
///
/// Every read either returns the expected shape or a [`ModelException`]
/// labelled with the offending event's position.
pub struct EventReader<'a> {
    file_name: &'a str,
    events: Vec<Event>,
    pos: usize,
}

impl<'a> EventReader<'a> {
    pub fn new(file_name: &'a str, events: Vec<Event>) -> Self {
        Self {
            file_name,
            events,
            pos: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name
    }

    pub fn peek(&self) -> Option<&Event> {
        self.events.get(self.pos)
    }

    /// Check the kind of the next event without consuming it.
    pub fn is_next(&self, kind: &EventKind) -> bool {
        self.peek().is_some_and(|e| e.kind.same_kind(kind))
    }

    /// Location of the next event, or of the last one at end of input.
    pub fn location(&self) -> Location {
        self.peek()
            .or_else(|| self.events.last())
            .map(|e| e.location)
            .unwrap_or_else(|| Location::point(crate::base::FileId::new(0), 0, 0))
    }

    pub fn error(&self, location: Location, message: impl Into<String>) -> ModelException {
        ModelException::new(self.file_name, location, message)
    }

    pub fn next(&mut self) -> Result<Event, ModelException> {
        match self.events.get(self.pos) {
            Some(event) => {
                self.pos += 1;
                Ok(event.clone())
            }
            None => Err(self.error(self.location(), "Fin de fichier inattendue.")),
        }
    }

    /// Consume the next event if it has the given kind.
    pub fn consume_if(&mut self, kind: &EventKind) -> bool {
        if self.is_next(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: EventKind) -> Result<Event, ModelException> {
        let event = self.next()?;
        if event.kind.same_kind(&kind) {
            Ok(event)
        } else {
            Err(self.error(
                event.location,
                format!("Attendu : {}, trouvé : {}.", kind.display(), event),
            ))
        }
    }

    pub fn scalar(&mut self) -> Result<LocatedString, ModelException> {
        let event = self.next()?;
        match event.kind {
            EventKind::Scalar(value) => Ok(LocatedString::new(value, event.location)),
            _ => Err(self.error(
                event.location,
                format!("Attendu : une valeur, trouvé : {event}."),
            )),
        }
    }

    /// A scalar where `~`, `null` and the empty string mean "absent".
    pub fn optional_scalar(&mut self) -> Result<Option<LocatedString>, ModelException> {
        let scalar = self.scalar()?;
        Ok(match scalar.as_str() {
            "~" | "null" | "" => None,
            _ => Some(scalar),
        })
    }

    pub fn string(&mut self) -> Result<String, ModelException> {
        Ok(self.scalar()?.value)
    }

    pub fn bool(&mut self) -> Result<bool, ModelException> {
        let scalar = self.scalar()?;
        match scalar.as_str() {
            "true" | "True" | "TRUE" => Ok(true),
            "false" | "False" | "FALSE" => Ok(false),
            other => Err(self.error(
                scalar.location,
                format!("La valeur '{other}' n'est pas un booléen."),
            )),
        }
    }

    pub fn number(&mut self) -> Result<u32, ModelException> {
        let scalar = self.scalar()?;
        scalar.as_str().parse().map_err(|_| {
            self.error(
                scalar.location,
                format!("La valeur '{}' n'est pas un entier positif.", scalar.value),
            )
        })
    }

    /// Either a single scalar or a sequence of scalars.
    pub fn scalar_list(&mut self) -> Result<Vec<LocatedString>, ModelException> {
        if self.is_next(&EventKind::SequenceStart) {
            let mut values = Vec::new();
            self.sequence(|reader| {
                values.push(reader.scalar()?);
                Ok(())
            })?;
            Ok(values)
        } else {
            Ok(self.optional_scalar()?.into_iter().collect())
        }
    }

    /// Walk a mapping, handing each key to `f`, which must consume the value.
    pub fn mapping<F>(&mut self, mut f: F) -> Result<(), ModelException>
    where
        F: FnMut(&mut Self, LocatedString) -> Result<(), ModelException>,
    {
        self.expect(EventKind::MappingStart)?;
        while !self.consume_if(&EventKind::MappingEnd) {
            let key = self.scalar()?;
            f(self, key)?;
        }
        Ok(())
    }

    /// Walk a sequence, calling `f` once per item; `f` must consume the item.
    pub fn sequence<F>(&mut self, mut f: F) -> Result<(), ModelException>
    where
        F: FnMut(&mut Self) -> Result<(), ModelException>,
    {
        self.expect(EventKind::SequenceStart)?;
        while !self.consume_if(&EventKind::SequenceEnd) {
            f(self)?;
        }
        Ok(())
    }

    /// Skip one complete node (scalar, mapping or sequence).
    pub fn skip_node(&mut self) -> Result<(), ModelException> {
        let mut depth = 0usize;
        loop {
            let event = self.next()?;
            match event.kind {
                EventKind::MappingStart | EventKind::SequenceStart => depth += 1,
                EventKind::MappingEnd | EventKind::SequenceEnd => depth = depth.saturating_sub(1),
                EventKind::Scalar(_) => {}
                _ => {
                    return Err(self.error(
                        event.location,
                        format!("Attendu : une valeur, trouvé : {event}."),
                    ));
                }
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::syntax::tokenize;

    fn reader_for(source: &str) -> EventReader<'static> {
        let events = tokenize(FileId::new(0), "Test", source).unwrap();
        let mut reader = EventReader::new("Test", events);
        reader.expect(EventKind::StreamStart).unwrap();
        reader.expect(EventKind::DocumentStart).unwrap();
        reader
    }

    #[test]
    fn test_mapping_and_scalar_list() {
        let mut reader = reader_for("tags: [back, front]\nmodule: Test\n");
        let mut seen = Vec::new();
        reader
            .mapping(|reader, key| {
                match key.as_str() {
                    "tags" => {
                        let tags = reader.scalar_list()?;
                        seen.push(format!("tags={}", tags.len()));
                    }
                    _ => seen.push(format!("{}={}", key.value, reader.string()?)),
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec!["tags=2", "module=Test"]);
    }

    #[test]
    fn test_bool_rejects_garbage() {
        let mut reader = reader_for("required: maybe\n");
        reader.expect(EventKind::MappingStart).unwrap();
        reader.scalar().unwrap();
        let err = reader.bool().unwrap_err();
        assert!(err.message.contains("maybe"));
    }

    #[test]
    fn test_skip_node_skips_nested_structure() {
        let mut reader = reader_for("a:\n  b: [1, 2, {c: 3}]\nd: 4\n");
        reader.expect(EventKind::MappingStart).unwrap();
        assert_eq!(reader.string().unwrap(), "a");
        reader.skip_node().unwrap();
        assert_eq!(reader.string().unwrap(), "d");
    }
}
