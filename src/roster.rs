use crate::calc;

pub const MAX_STUDENTS: usize = 100;
/// Field buffers and persisted strings mirror the original 50-byte
/// NUL-terminated slots: at most 49 characters of content.
pub const MAX_FIELD_CHARS: usize = 49;

pub const DEMO_STUDENT_ID: i32 = 1001;
pub const DEMO_STUDENT_NAME: &str = "Demo Student";
pub const DEMO_STUDENT_COURSE: &str = "Computer Science";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: i32,
    pub name: String,
    pub course: String,
    pub password: String,
    pub total_classes: i32,
    pub attended_classes: i32,
    pub is_defaulter: bool,
}

impl StudentRecord {
    pub fn percent(&self) -> f32 {
        calc::attendance_percent(self.attended_classes, self.total_classes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    MissingField,
    InvalidId,
    CapacityExceeded,
    DuplicateId,
}

impl AddError {
    pub fn code(self) -> &'static str {
        match self {
            AddError::MissingField => "missing_field",
            AddError::InvalidId => "invalid_id",
            AddError::CapacityExceeded => "capacity_exceeded",
            AddError::DuplicateId => "duplicate_id",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AddError::MissingField => "All fields are required!",
            AddError::InvalidId => "ID must be a positive number!",
            AddError::CapacityExceeded => "Student limit reached!",
            AddError::DuplicateId => "ID already exists!",
        }
    }
}

/// Insertion-ordered, append-only student directory. Records are never
/// removed; the original system has no delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    pub fn find_by_id(&self, id: i32) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Validates and appends a new record with zeroed attendance.
    /// Check order is fixed: empty fields, id parse/positivity, capacity,
    /// then duplicate id. Capacity before duplicate is compatibility with
    /// the original validation and must not be reordered.
    pub fn add(
        &mut self,
        id_text: &str,
        name: &str,
        course: &str,
        password: &str,
    ) -> Result<usize, AddError> {
        if id_text.is_empty() || name.is_empty() || course.is_empty() || password.is_empty() {
            return Err(AddError::MissingField);
        }
        // atoi semantics: a failed parse reads as 0 and trips the same check.
        let id: i32 = id_text.parse().unwrap_or(0);
        if id <= 0 {
            return Err(AddError::InvalidId);
        }
        if self.records.len() >= MAX_STUDENTS {
            return Err(AddError::CapacityExceeded);
        }
        if self.find_by_id(id).is_some() {
            return Err(AddError::DuplicateId);
        }
        self.records.push(StudentRecord {
            id,
            name: truncate_field(name),
            course: truncate_field(course),
            password: truncate_field(password),
            total_classes: 0,
            attended_classes: 0,
            is_defaulter: false,
        });
        Ok(self.records.len() - 1)
    }

    /// Index must come from the current roster snapshot; out of range is a
    /// frontend contract violation and panics.
    pub fn mark_present(&mut self, index: usize) {
        let rec = &mut self.records[index];
        rec.total_classes += 1;
        rec.attended_classes += 1;
        rec.is_defaulter = calc::is_defaulter(rec.attended_classes, rec.total_classes);
    }

    pub fn mark_absent(&mut self, index: usize) {
        let rec = &mut self.records[index];
        rec.total_classes += 1;
        rec.is_defaulter = calc::is_defaulter(rec.attended_classes, rec.total_classes);
    }

    pub fn recompute_flags(&mut self) {
        for rec in &mut self.records {
            rec.is_defaulter = calc::is_defaulter(rec.attended_classes, rec.total_classes);
        }
    }

    pub fn defaulters(&self) -> impl Iterator<Item = (usize, &StudentRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_defaulter)
    }

    /// Seeds the fixed demo record into an empty roster. Returns whether
    /// anything was added (callers persist immediately when it was).
    pub fn seed_demo_if_empty(&mut self, demo_password: &str) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.records.push(StudentRecord {
            id: DEMO_STUDENT_ID,
            name: DEMO_STUDENT_NAME.to_string(),
            course: DEMO_STUDENT_COURSE.to_string(),
            password: demo_password.to_string(),
            total_classes: 10,
            attended_classes: 7,
            is_defaulter: false,
        });
        self.recompute_flags();
        true
    }
}

pub fn truncate_field(s: &str) -> String {
    s.chars().take(MAX_FIELD_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_roster() -> Roster {
        let mut roster = Roster::new();
        for i in 1..=MAX_STUDENTS as i32 {
            roster
                .add(&i.to_string(), "Name", "Course", "pw")
                .expect("add within capacity");
        }
        roster
    }

    #[test]
    fn add_validation_order() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.add("", "a", "b", "c"),
            Err(AddError::MissingField)
        );
        assert_eq!(
            roster.add("abc", "a", "b", "c"),
            Err(AddError::InvalidId)
        );
        assert_eq!(roster.add("0", "a", "b", "c"), Err(AddError::InvalidId));
        assert_eq!(roster.add("-5", "a", "b", "c"), Err(AddError::InvalidId));
        assert_eq!(roster.add("7", "a", "b", "c"), Ok(0));
        assert_eq!(roster.add("7", "x", "y", "z"), Err(AddError::DuplicateId));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn capacity_is_checked_before_duplicate() {
        let mut roster = full_roster();
        // Duplicate id at capacity still reports the capacity error.
        assert_eq!(
            roster.add("1", "a", "b", "c"),
            Err(AddError::CapacityExceeded)
        );
        assert_eq!(
            roster.add("9999", "a", "b", "c"),
            Err(AddError::CapacityExceeded)
        );
        assert_eq!(roster.len(), MAX_STUDENTS);
    }

    #[test]
    fn marking_updates_counts_and_flag() {
        let mut roster = Roster::new();
        let idx = roster.add("1", "a", "b", "c").expect("add");
        roster.mark_present(idx);
        roster.mark_present(idx);
        roster.mark_present(idx);
        let rec = roster.get(idx).expect("record");
        assert_eq!((rec.total_classes, rec.attended_classes), (3, 3));
        assert!(!rec.is_defaulter);

        roster.mark_present(idx);
        let rec = roster.get(idx).expect("record");
        assert_eq!((rec.total_classes, rec.attended_classes), (4, 4));
        assert_eq!(rec.percent(), 100.0);
        assert!(!rec.is_defaulter);

        roster.mark_absent(idx);
        roster.mark_absent(idx);
        let rec = roster.get(idx).expect("record");
        assert_eq!((rec.total_classes, rec.attended_classes), (6, 4));
        assert!(rec.is_defaulter); // 66.7%
    }

    #[test]
    fn seeded_demo_record_is_a_defaulter() {
        let mut roster = Roster::new();
        assert!(roster.seed_demo_if_empty("student123"));
        assert!(!roster.seed_demo_if_empty("student123"));
        let rec = roster.get(0).expect("seeded");
        assert_eq!(rec.id, DEMO_STUDENT_ID);
        assert_eq!(rec.percent(), 70.0);
        assert!(rec.is_defaulter);
    }

    #[test]
    fn field_truncation_at_49_chars() {
        let long = "x".repeat(80);
        let mut roster = Roster::new();
        let idx = roster.add("1", &long, "c", "p").expect("add");
        assert_eq!(roster.get(idx).expect("record").name.len(), MAX_FIELD_CHARS);
    }
}
