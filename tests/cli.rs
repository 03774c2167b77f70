mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Mock, Server, ServerGuard};
    use predicates::str::contains;

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "waybackurls";

    const WAYBACK_ONE_ROW: &str =
        r#"[["original","timestamp"],["a","20200101000000","http://x.com/a"]]"#;

    /// Command wired to the mock server, with fast retries and no config file.
    fn command_for(
        server: &ServerGuard,
        attempts: u32,
    ) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("--no-config")
            .arg("--wayback-endpoint")
            .arg(format!("{}/wb/{{domain}}", server.url()))
            .arg("--commoncrawl-endpoint")
            .arg(format!("{}/cc/{{domain}}", server.url()))
            .arg("--retry")
            .arg(attempts.to_string())
            .arg("--retry-delay")
            .arg("1")
            .arg("--timeout")
            .arg("5");
        Ok(cmd)
    }

    fn wayback_mock(server: &mut ServerGuard, domain: &str, status: usize, body: &str) -> Mock {
        server
            .mock("GET", format!("/wb/{domain}").as_str())
            .with_status(status)
            .with_body(body)
            .create()
    }

    fn commoncrawl_mock(server: &mut ServerGuard, domain: &str, status: usize, body: &str) -> Mock {
        server
            .mock("GET", format!("/cc/{domain}").as_str())
            .with_status(status)
            .with_body(body)
            .create()
    }

    fn stdout_of(cmd: &mut Command) -> Result<String, Box<dyn std::error::Error>> {
        let output = cmd.output()?;
        Ok(String::from_utf8(output.stdout)?)
    }

    #[test]
    fn test_output__plain_urls_from_wayback() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback").arg("x.com");

        cmd.assert().success();
        assert_eq!(stdout_of(&mut cmd)?, "http://x.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__dated_urls_from_wayback() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback").arg("--dates").arg("x.com");

        assert_eq!(stdout_of(&mut cmd)?, "2020-01-01T00:00:00Z http://x.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__server_error_falls_back_and_continues() -> TestResult {
        let mut server = Server::new();
        let _m500 = wayback_mock(&mut server, "x.com", 500, "");
        let _m200 = wayback_mock(
            &mut server,
            "y.com",
            200,
            r#"[["original"],["a","20200101000000","http://y.com/a"]]"#,
        );
        let mut domains = tempfile::NamedTempFile::new()?;
        domains.write_all(b"x.com\ny.com\n")?;
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback").arg("-i").arg(domains.path());

        cmd.assert()
            .success()
            .stderr(contains("failed to fetch URLs for [x.com] from wayback"));
        assert_eq!(stdout_of(&mut cmd)?, "http://x.com\nhttp://y.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__server_error_is_retried() -> TestResult {
        let mut server = Server::new();
        let m = server
            .mock("GET", "/wb/x.com")
            .with_status(503)
            .expect(3)
            .create();
        let mut cmd = command_for(&server, 3)?;

        cmd.arg("--source").arg("wayback").arg("x.com");

        cmd.assert().success().stdout("http://x.com\n");
        m.assert();
        Ok(())
    }

    #[test]
    fn test_output__malformed_commoncrawl_line_is_skipped() -> TestResult {
        let mut server = Server::new();
        let body = concat!(
            "{\"timestamp\":\"20180520000000\",\"url\":\"http://x.com/before\"}\n",
            "{\"timestamp\": not json at all\n",
            "{\"timestamp\":\"20180521000000\",\"url\":\"http://x.com/after\"}\n",
        );
        let _m = commoncrawl_mock(&mut server, "x.com", 200, body);
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("commoncrawl").arg("x.com");

        assert_eq!(
            stdout_of(&mut cmd)?,
            "http://x.com/before\nhttp://x.com/after\n"
        );
        Ok(())
    }

    #[test]
    fn test_output__same_url_from_both_backends_printed_once() -> TestResult {
        let mut server = Server::new();
        let _wb = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let _cc = commoncrawl_mock(
            &mut server,
            "x.com",
            200,
            "{\"timestamp\":\"20180520000000\",\"url\":\"http://x.com/a\"}\n",
        );
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("x.com");

        assert_eq!(stdout_of(&mut cmd)?, "http://x.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__overlapping_backends_union() -> TestResult {
        let mut server = Server::new();
        let _wb = wayback_mock(
            &mut server,
            "x.com",
            200,
            r#"[["original"],["k","20200101000000","http://x.com/a"],["k","20200101000000","http://x.com/b"]]"#,
        );
        let _cc = commoncrawl_mock(
            &mut server,
            "x.com",
            200,
            "{\"timestamp\":\"1\",\"url\":\"http://x.com/b\"}\n{\"timestamp\":\"1\",\"url\":\"http://x.com/c\"}\n",
        );
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("x.com");

        let stdout = stdout_of(&mut cmd)?;
        let mut lines: Vec<&str> = stdout.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["http://x.com/a", "http://x.com/b", "http://x.com/c"]);
        Ok(())
    }

    #[test]
    fn test_output__unreachable_archive_prints_bare_domain() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--source")
            .arg("wayback")
            .arg("--wayback-endpoint")
            .arg("http://127.0.0.1:1/{domain}")
            .arg("--retry")
            .arg("2")
            .arg("--retry-delay")
            .arg("1")
            .arg("x.com");

        cmd.assert()
            .success()
            .stdout("http://x.com\n")
            .stderr(contains("failed to fetch URLs for [x.com] from wayback"));
        Ok(())
    }

    #[test]
    fn test_output__domains_from_stdin() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback");
        let mut cmd = assert_cmd::Command::from_std(cmd);
        cmd.write_stdin("\nx.com\n\n");

        cmd.assert().success().stdout("http://x.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__result_file() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let dir = tempfile::tempdir()?;
        let result = dir.path().join("urls.txt");
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source")
            .arg("wayback")
            .arg("-o")
            .arg(&result)
            .arg("x.com");

        cmd.assert().success().stdout("");
        assert_eq!(std::fs::read_to_string(&result)?, "http://x.com/a\n");
        Ok(())
    }

    #[test]
    fn test_output__unwritable_result_file_is_fatal() -> TestResult {
        let mut server = Server::new();
        let m = server.mock("GET", "/wb/x.com").expect(0).create();
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source")
            .arg("wayback")
            .arg("-o")
            .arg("/definitely/not/a/dir/urls.txt")
            .arg("x.com");

        cmd.assert()
            .failure()
            .stderr(contains("Could not create result file"));
        m.assert();
        Ok(())
    }

    #[test]
    fn test_output__no_urls_exits_with_failure() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, r#"[["original"]]"#);
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback").arg("x.com");

        cmd.assert().failure().stdout("");
        Ok(())
    }

    #[test]
    fn test_output__invalid_config_fails_before_network() -> TestResult {
        let mut server = Server::new();
        let m = server.mock("GET", "/wb/x.com").expect(0).create();
        let mut cmd = command_for(&server, 0)?;

        cmd.arg("x.com");

        cmd.assert()
            .failure()
            .stderr(contains("Retry attempts cannot be 0"));
        m.assert();
        Ok(())
    }

    #[test]
    fn test_output__no_domains_on_stdin() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config");
        let mut cmd = assert_cmd::Command::from_std(cmd);
        cmd.write_stdin("");

        cmd.assert()
            .failure()
            .stderr(contains("No domains provided"));
        Ok(())
    }

    #[test]
    fn test_output__target_and_input_conflict() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("x.com").arg("-i").arg("domains.txt");

        cmd.assert().failure().stderr(contains("cannot be used with"));
        Ok(())
    }

    #[test]
    fn test_output__unknown_source_rejected() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--source").arg("alexa").arg("x.com");

        cmd.assert().failure().stderr(contains("invalid value 'alexa'"));
        Ok(())
    }

    #[test]
    fn test_output__quiet_suppresses_diagnostics() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 500, "");
        let mut cmd = command_for(&server, 1)?;

        cmd.arg("--source").arg("wayback").arg("-q").arg("x.com");

        cmd.assert().success().stdout("http://x.com\n").stderr("");
        Ok(())
    }

    #[test]
    fn test_output__repeat_runs_are_identical() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(
            &mut server,
            "x.com",
            200,
            r#"[["original"],["k","20200101000000","http://x.com/a"],["k","20210101000000","http://x.com/b"]]"#,
        );

        let first = stdout_of(command_for(&server, 1)?.args(["--source", "wayback", "-d", "x.com"]))?;
        let second = stdout_of(command_for(&server, 1)?.args(["--source", "wayback", "-d", "x.com"]))?;

        assert_eq!(first, second);
        assert_eq!(
            first,
            "2020-01-01T00:00:00Z http://x.com/a\n2021-01-01T00:00:00Z http://x.com/b\n"
        );
        Ok(())
    }

    #[test]
    fn test_output__stalled_body_is_retried_then_falls_back() -> TestResult {
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/wb/x.com")
            .with_status(200)
            .with_chunked_body(|w: &mut dyn Write| {
                w.write_all(br#"[["original"],"#)?;
                w.flush()?;
                std::thread::sleep(std::time::Duration::from_millis(2500));
                w.write_all(b"]")
            })
            .create();
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--source")
            .arg("wayback")
            .arg("--wayback-endpoint")
            .arg(format!("{}/wb/{{domain}}", server.url()))
            .arg("--timeout")
            .arg("1")
            .arg("--retry")
            .arg("2")
            .arg("--retry-delay")
            .arg("1")
            .arg("x.com");

        cmd.assert()
            .success()
            .stdout("http://x.com\n")
            .stderr(contains("failed 2 time(s)"));
        Ok(())
    }

    #[test]
    fn test_output__retry_delay_above_default_ceiling_is_rejected() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--retry-delay")
            .arg("45000")
            .arg("x.com");

        cmd.assert()
            .failure()
            .stderr(contains("--max-retry-delay"));
        Ok(())
    }

    #[test]
    fn test_output__raised_ceiling_accepts_long_retry_delay() -> TestResult {
        let mut server = Server::new();
        let _m = wayback_mock(&mut server, "x.com", 200, WAYBACK_ONE_ROW);
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("--source")
            .arg("wayback")
            .arg("--wayback-endpoint")
            .arg(format!("{}/wb/{{domain}}", server.url()))
            .arg("--retry")
            .arg("1")
            .arg("--retry-delay")
            .arg("45000")
            .arg("--max-retry-delay")
            .arg("60000")
            .arg("x.com");

        cmd.assert().success().stdout("http://x.com/a\n");
        Ok(())
    }
}
