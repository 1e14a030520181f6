//! Path templates with a single captured variable.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable,
}

/// A path template such as `/users/{userId}`.
///
/// A template matches a path when every template segment matches the
/// corresponding path segment; extra trailing path segments are allowed,
/// so `/users/{userId}` also matches `/users/5/password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// The owner template used for user resources.
    pub fn users() -> Self {
        Self {
            segments: vec![
                Segment::Literal("users".into()),
                Segment::Variable,
            ],
        }
    }

    /// Match `path` and return the raw captured segment.
    ///
    /// `None` when the path does not fit the template or the captured
    /// segment is empty.
    pub fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        let mut parts = path.strip_prefix('/').unwrap_or(path).split('/');
        let mut captured = None;

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable if part.is_empty() => return None,
                Segment::Variable => captured = Some(part),
            }
        }
        captured
    }
}
