//! Query construction error types.

/// No entity set was supplied before a compile or terminal operation.
#[derive(Debug, Clone)]
pub struct MissingEntitySet {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MissingEntitySet {
    /// Create a new MissingEntitySet at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}

impl Default for MissingEntitySet {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MissingEntitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Missing Entity Set: no entity set on the query at line {} in {}",
            self.line, self.file
        )
    }
}

impl std::error::Error for MissingEntitySet {}

/// A terminal operation ran on a builder with no attached client.
#[derive(Debug, Clone)]
pub struct MissingRequestTarget {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MissingRequestTarget {
    /// Create a new MissingRequestTarget at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}

impl Default for MissingRequestTarget {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MissingRequestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Missing Request Target: no client attached to the query at line {} in {}",
            self.line, self.file
        )
    }
}

impl std::error::Error for MissingRequestTarget {}

/// A null value was paired with a comparison operator other than
/// equality/inequality.
#[derive(Debug, Clone)]
pub struct InvalidOperatorValue {
    /// The offending operator token
    pub operator: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InvalidOperatorValue {
    /// Create a new InvalidOperatorValue for the given operator token.
    #[track_caller]
    pub fn new(operator: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operator: operator.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for InvalidOperatorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid Operator and Value: operator '{}' cannot compare against null at line {} in {}",
            self.operator, self.line, self.file
        )
    }
}

impl std::error::Error for InvalidOperatorValue {}

/// An operator token outside the grammar's operator and function sets.
#[derive(Debug, Clone)]
pub struct IllegalOperatorCombination {
    /// The unrecognized operator token
    pub token: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IllegalOperatorCombination {
    /// Create a new IllegalOperatorCombination for the given token.
    #[track_caller]
    pub fn new(token: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            token: token.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for IllegalOperatorCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Illegal Operator: '{}' is not a recognized operator or function at line {} in {}",
            self.token, self.line, self.file
        )
    }
}

impl std::error::Error for IllegalOperatorCombination {}

/// A binding category outside the fixed select/where/order set.
#[derive(Debug, Clone)]
pub struct InvalidBindingCategory {
    /// The unrecognized category name
    pub category: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InvalidBindingCategory {
    /// Create a new InvalidBindingCategory for the given category name.
    #[track_caller]
    pub fn new(category: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            category: category.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for InvalidBindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid Binding Category: '{}' at line {} in {}",
            self.category, self.line, self.file
        )
    }
}

impl std::error::Error for InvalidBindingCategory {}
