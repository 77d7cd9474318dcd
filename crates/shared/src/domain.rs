pub const PASSWORD_HINT: &str = "Must be at least 8 characters and include letters & numbers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Password,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::FullName, FormField::Email, FormField::Password];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email Address",
            FormField::Password => "Password",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::FullName => "John Doe",
            FormField::Email => "john@example.com",
            FormField::Password => "Enter your password",
        }
    }

    /// Whether a front end should mask the entered value.
    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Password)
    }
}

/// Raw text captured from the signup form, exactly as typed.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct FormState {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl FormState {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FullName => self.full_name = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.email.is_empty() && self.password.is_empty()
    }

    pub fn clear(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.password.clear();
    }
}

// Password stays out of debug output and therefore out of logs.
impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Error(String),
    Success(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Error(message) | SubmissionStatus::Success(message) => {
                Some(message.as_str())
            }
            SubmissionStatus::Idle | SubmissionStatus::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SubmissionStatus::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionStatus::Success(_))
    }
}
