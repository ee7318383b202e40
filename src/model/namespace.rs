use std::fmt;

/// Application name plus dotted module path (`Securite.Utilisateur`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub app: String,
    pub module: String,
}

impl Namespace {
    pub fn new(app: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            module: module.into(),
        }
    }

    /// First segment of the module path: the bounded context.
    pub fn root_module(&self) -> &str {
        self.module.split('.').next().unwrap_or_default()
    }

    pub fn module_segments(&self) -> impl Iterator<Item = &str> {
        self.module.split('.').filter(|s| !s.is_empty())
    }

    /// `Module.Name`, or just `Name` outside any module.
    pub fn qualify(&self, name: &str) -> String {
        if self.module.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.module, name)
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.app.is_empty(), self.module.is_empty()) {
            (true, _) => f.write_str(&self.module),
            (false, true) => f.write_str(&self.app),
            (false, false) => write!(f, "{}.{}", self.app, self.module),
        }
    }
}
