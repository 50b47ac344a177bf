use crate::roster::{Roster, DEMO_STUDENT_ID, MAX_FIELD_CHARS};

// Fixed credentials, verbatim from the original system. Plaintext
// comparison is a known defect kept for behavioral parity.
pub const ADMIN_ID: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const DEMO_LOGIN_ID: &str = "student";
pub const DEMO_LOGIN_PASSWORD: &str = "student123";

/// Display time for a transient notice, in milliseconds.
pub const NOTICE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    AdminMenu,
    StudentMenu,
    AddStudent,
    MarkAttendance,
    ViewRecords,
    Reports,
    StudentView,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::AdminMenu => "adminMenu",
            Screen::StudentMenu => "studentMenu",
            Screen::AddStudent => "addStudent",
            Screen::MarkAttendance => "markAttendance",
            Screen::ViewRecords => "viewRecords",
            Screen::Reports => "reports",
            Screen::StudentView => "studentView",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "login" => Screen::Login,
            "adminMenu" => Screen::AdminMenu,
            "studentMenu" => Screen::StudentMenu,
            "addStudent" => Screen::AddStudent,
            "markAttendance" => Screen::MarkAttendance,
            "viewRecords" => Screen::ViewRecords,
            "reports" => Screen::Reports,
            "studentView" => Screen::StudentView,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
}

/// Explicit navigation table. Login/logout moves are owned by the auth
/// methods, so `login` never appears as a `nav.goto` target.
pub fn can_navigate(role: Option<Role>, from: Screen, to: Screen) -> bool {
    match (role, from, to) {
        (
            Some(Role::Admin),
            Screen::AdminMenu,
            Screen::AddStudent | Screen::MarkAttendance | Screen::ViewRecords | Screen::Reports,
        ) => true,
        (
            Some(Role::Admin),
            Screen::AddStudent | Screen::MarkAttendance | Screen::ViewRecords | Screen::Reports,
            Screen::AdminMenu,
        ) => true,
        (Some(Role::Student), Screen::StudentMenu, Screen::StudentView) => true,
        (Some(Role::Student), Screen::StudentView, Screen::StudentMenu) => true,
        _ => false,
    }
}

/// Current authenticated role, the bound roster index for students, and the
/// active screen. One session per process; reset on logout.
#[derive(Debug, Clone)]
pub struct Session {
    pub role: Option<Role>,
    pub current_student: Option<usize>,
    pub screen: Screen,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            role: None,
            current_student: None,
            screen: Screen::Login,
        }
    }
}

impl Session {
    /// Credential checks in the original precedence, first match wins:
    /// fixed admin pair, fixed demo-student pair (bound to the seeded
    /// record if present), then a linear scan over registered students by
    /// decimal id text.
    pub fn login(
        &mut self,
        roster: &Roster,
        identifier: &str,
        password: &str,
    ) -> Result<Role, AuthError> {
        if identifier == ADMIN_ID && password == ADMIN_PASSWORD {
            self.role = Some(Role::Admin);
            self.current_student = None;
            self.screen = Screen::AdminMenu;
            return Ok(Role::Admin);
        }
        if identifier == DEMO_LOGIN_ID && password == DEMO_LOGIN_PASSWORD {
            self.role = Some(Role::Student);
            self.current_student = roster.find_by_id(DEMO_STUDENT_ID);
            self.screen = Screen::StudentMenu;
            return Ok(Role::Student);
        }
        for (index, rec) in roster.records().iter().enumerate() {
            if rec.id.to_string() == identifier && rec.password == password {
                self.role = Some(Role::Student);
                self.current_student = Some(index);
                self.screen = Screen::StudentMenu;
                return Ok(Role::Student);
            }
        }
        Err(AuthError::InvalidCredentials)
    }

    pub fn logout(&mut self) {
        self.role = None;
        self.current_student = None;
        self.screen = Screen::Login;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Course,
    Password,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Course => "course",
            Field::Password => "password",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "id" => Field::Id,
            "name" => Field::Name,
            "course" => Field::Course,
            "password" => Field::Password,
            _ => return None,
        })
    }
}

/// The four form text buffers plus the active-field pointer used while
/// composing input before a submit.
#[derive(Debug, Clone, Default)]
pub struct FieldBuffers {
    pub id: String,
    pub name: String,
    pub course: String,
    pub password: String,
    pub active: Option<Field>,
}

impl FieldBuffers {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Course => &self.course,
            Field::Password => &self.password,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Course => &mut self.course,
            Field::Password => &mut self.password,
        }
    }

    /// Appends one typed character to the active buffer. Printable ASCII
    /// only and capped at the 49-character slot width, both enforced here
    /// at the input boundary.
    pub fn append(&mut self, c: char) {
        let Some(field) = self.active else { return };
        let buf = self.get_mut(field);
        if (' '..='}').contains(&c) && buf.chars().count() < MAX_FIELD_CHARS {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active {
            self.get_mut(field).pop();
        }
    }

    pub fn clear_all(&mut self) {
        self.id.clear();
        self.name.clear();
        self.course.clear();
        self.password.clear();
        self.active = None;
    }

    /// Login attempts wipe only the credential buffers.
    pub fn clear_credentials(&mut self) {
        self.id.clear();
        self.password.clear();
        self.active = None;
    }
}

/// One transient message with a frame-driven countdown. Purely cosmetic;
/// the shell reports elapsed frame time through `tick`.
#[derive(Debug, Clone, Default)]
pub struct Notice {
    pub text: String,
    pub remaining_ms: u64,
}

impl Notice {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.remaining_ms = NOTICE_MS;
    }

    pub fn tick(&mut self, elapsed_ms: u64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.text.clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.remaining_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with(id: &str, password: &str) -> Roster {
        let mut roster = Roster::new();
        roster
            .add(id, "Some Name", "Math", password)
            .expect("add record");
        roster
    }

    #[test]
    fn login_precedence_admin_then_demo_then_scan() {
        let mut roster = Roster::new();
        roster.seed_demo_if_empty(DEMO_LOGIN_PASSWORD);
        let mut session = Session::default();

        assert_eq!(
            session.login(&roster, ADMIN_ID, ADMIN_PASSWORD),
            Ok(Role::Admin)
        );
        assert_eq!(session.screen, Screen::AdminMenu);
        assert_eq!(session.current_student, None);

        assert_eq!(
            session.login(&roster, DEMO_LOGIN_ID, DEMO_LOGIN_PASSWORD),
            Ok(Role::Student)
        );
        assert_eq!(session.current_student, Some(0));
        assert_eq!(session.screen, Screen::StudentMenu);
    }

    #[test]
    fn login_scans_registered_students_by_decimal_id() {
        let roster = roster_with("42", "secret");
        let mut session = Session::default();
        assert_eq!(session.login(&roster, "42", "secret"), Ok(Role::Student));
        assert_eq!(session.current_student, Some(0));

        assert_eq!(
            session.login(&roster, "42", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            session.login(&roster, "43", "secret"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn logout_resets_to_login() {
        let roster = roster_with("42", "secret");
        let mut session = Session::default();
        session.login(&roster, "42", "secret").expect("login");
        session.logout();
        assert_eq!(session.role, None);
        assert_eq!(session.current_student, None);
        assert_eq!(session.screen, Screen::Login);
    }

    #[test]
    fn navigation_table_is_role_gated() {
        let admin = Some(Role::Admin);
        let student = Some(Role::Student);
        assert!(can_navigate(admin, Screen::AdminMenu, Screen::AddStudent));
        assert!(can_navigate(admin, Screen::MarkAttendance, Screen::AdminMenu));
        assert!(can_navigate(student, Screen::StudentMenu, Screen::StudentView));
        assert!(can_navigate(student, Screen::StudentView, Screen::StudentMenu));

        // Back from an admin screen never reaches a student screen.
        assert!(!can_navigate(admin, Screen::MarkAttendance, Screen::StudentMenu));
        assert!(!can_navigate(admin, Screen::MarkAttendance, Screen::Login));
        // Role mismatches and unauthenticated moves are rejected.
        assert!(!can_navigate(student, Screen::AdminMenu, Screen::AddStudent));
        assert!(!can_navigate(None, Screen::AdminMenu, Screen::AddStudent));
        assert!(!can_navigate(admin, Screen::AdminMenu, Screen::StudentView));
        assert!(!can_navigate(admin, Screen::Login, Screen::AdminMenu));
    }

    #[test]
    fn buffers_cap_length_and_filter_nonprintable() {
        let mut buffers = FieldBuffers::default();
        buffers.active = Some(Field::Name);
        for _ in 0..80 {
            buffers.append('x');
        }
        assert_eq!(buffers.name.len(), MAX_FIELD_CHARS);

        buffers.active = Some(Field::Id);
        buffers.append('\n');
        buffers.append('\u{7f}');
        buffers.append('1');
        assert_eq!(buffers.id, "1");
        buffers.backspace();
        assert_eq!(buffers.id, "");
        buffers.backspace(); // empty buffer is a no-op
    }

    #[test]
    fn notice_counts_down_and_clears() {
        let mut notice = Notice::default();
        notice.show("Marked Present!");
        assert!(notice.is_visible());
        notice.tick(1000);
        assert_eq!(notice.remaining_ms, 2000);
        assert!(notice.is_visible());
        notice.tick(5000);
        assert!(!notice.is_visible());
        assert!(notice.text.is_empty());
    }
}
