use std::fmt;

/// The views reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Detail { datetime: String },
    Trend,
    Comparison,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["detail", datetime] => Route::Detail { datetime: (*datetime).to_string() },
            ["trend"] => Route::Trend,
            ["comparison"] => Route::Comparison,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Detail { datetime } => format!("/detail/{datetime}"),
            Route::Trend => "/trend".to_string(),
            Route::Comparison => "/comparison".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Entries of the navigation menu, in display order.
    pub const fn nav() -> &'static [(&'static str, &'static str)] {
        &[("Dashboard", "/"), ("Temp Trend", "/trend"), ("Temp Comp", "/comparison")]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
