use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Process exit code used by the command-line front end.
    pub exit_code: i32,
    /// Caused by the user's input files or flags rather than by the tool itself.
    pub user_facing: bool,
}

impl ReportError {
    /// Classify this error to determine its type and how the CLI should exit.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Input problems
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
                user_facing: true,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 2,
                user_facing: true,
            },
            ReportError::Input(_) => ErrorClassification {
                error_type: "InputError",
                exit_code: 3,
                user_facing: true,
            },
            ReportError::Parse(_) => ErrorClassification {
                error_type: "ParseError",
                exit_code: 3,
                user_facing: true,
            },
            ReportError::EmptyInput => ErrorClassification {
                error_type: "EmptyInputError",
                exit_code: 4,
                user_facing: true,
            },

            // Everything else
            ReportError::Render(_) => ErrorClassification {
                error_type: "RenderError",
                exit_code: 1,
                user_facing: false,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
                user_facing: false,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
                user_facing: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_classification() {
        let class = ReportError::EmptyInput.classify();
        assert_eq!(class.error_type, "EmptyInputError");
        assert_eq!(class.exit_code, 4);
        assert!(class.user_facing);
    }

    #[test]
    fn test_parse_error_exit_code() {
        let err = ReportError::Parse("unequal lengths".into());
        assert_eq!(err.classify().exit_code, 3);
        assert!(err.classify().user_facing);
    }

    #[test]
    fn test_missing_input_is_not_a_config_error() {
        let err = ReportError::Input("alerts.csv not found".into());
        let class = err.classify();
        assert_eq!(class.error_type, "InputError");
        assert_eq!(class.exit_code, 3);
        assert!(class.user_facing);
        assert!(err.to_string().starts_with("Cannot read alert export"));
    }

    #[test]
    fn test_config_error_exit_code() {
        let err = ReportError::Config("missing file".into());
        let class = err.classify();
        assert_eq!(class.exit_code, 2);
        assert_eq!(class.error_type, "ConfigError");
        assert!(class.user_facing);
    }

    #[test]
    fn test_io_error_not_user_facing() {
        let err = ReportError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let class = err.classify();
        assert_eq!(class.error_type, "IoError");
        assert_eq!(class.exit_code, 1);
        assert!(!class.user_facing);
    }

    #[test]
    fn test_render_error_not_user_facing() {
        let err = ReportError::Render("formatter failed".into());
        let class = err.classify();
        assert_eq!(class.exit_code, 1);
        assert!(!class.user_facing);
    }

    #[test]
    fn test_empty_input_message() {
        assert_eq!(ReportError::EmptyInput.to_string(), "No alerts found in input");
    }
}
