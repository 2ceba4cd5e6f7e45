#[cfg(test)]
mod tests {
    use crate::cli::{parse_app_name, Cli};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_app_name() {
        assert_eq!(parse_app_name("Quizify"), Ok("Quizify".to_string()));
        assert!(parse_app_name("").is_err());
        assert!(parse_app_name("nested/app").is_err());
        assert!(parse_app_name("..").is_err());
    }

    #[test]
    fn test_no_flags_produce_no_overrides() {
        let cli = Cli::try_parse_from(["sitehost"]).unwrap();
        let overrides = cli.serve.overrides();

        assert!(overrides.port.is_none());
        assert!(overrides.build.is_none());
        assert!(overrides.tls.is_none());
        assert!(overrides.app_name.is_none());
        assert!(!cli.serve.print_config);
    }

    #[test]
    fn test_all_original_flags() {
        let cli = Cli::try_parse_from([
            "sitehost",
            "--cert",
            "c.pem",
            "--key",
            "k.pem",
            "--port",
            "8443",
            "--host",
            "0.0.0.0",
            "--build",
            "--source",
            "src-site",
            "--output",
            "out",
            "--app-name",
            "Demo",
        ])
        .unwrap();
        let overrides = cli.serve.overrides();

        assert_eq!(overrides.cert, Some(PathBuf::from("c.pem")));
        assert_eq!(overrides.key, Some(PathBuf::from("k.pem")));
        assert_eq!(overrides.port, Some(8443));
        assert_eq!(overrides.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(overrides.build, Some(true));
        assert_eq!(overrides.source, Some(PathBuf::from("src-site")));
        assert_eq!(overrides.output, Some(PathBuf::from("out")));
        assert_eq!(overrides.app_name.as_deref(), Some("Demo"));
    }

    #[test]
    fn test_no_tls_turns_tls_off() {
        let cli = Cli::try_parse_from(["sitehost", "--no-tls"]).unwrap();
        assert_eq!(cli.serve.overrides().tls, Some(false));
    }

    #[test]
    fn test_invalid_app_name_rejected_by_parser() {
        let result = Cli::try_parse_from(["sitehost", "--app-name", "a/b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["sitehost", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["sitehost", "--port", "http"]).is_err());
    }

    #[test]
    fn test_cli_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["sitehost", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }
}
