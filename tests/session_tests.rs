// Tests for console reporting sessions - public API only

use tapconsole::report::{
    Channel, Color, FormatterOptions, MemorySink, Session, SessionArgs, Verbosity,
};
use tapconsole::state::{Directive, ResultEvent, RunStatistics};

fn run_session(sink: &mut MemorySink, args: SessionArgs, events: &[ResultEvent]) -> RunStatistics {
    let mut stats = RunStatistics::new();
    let mut session = Session::new(sink, args);
    session.header().expect("header failed");
    for event in events {
        stats.record(event);
        session.result(&stats, event).expect("result failed");
    }
    session.close(&stats).expect("close failed");
    stats
}

fn options(verbosity: Verbosity) -> FormatterOptions {
    FormatterOptions {
        verbosity,
        ..Default::default()
    }
}

#[test]
fn test_passing_run_prints_ok() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default());
    let events = [ResultEvent::plan(2), ResultEvent::pass(1, ""), ResultEvent::pass(2, "")];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.output(), "t/a.t .. ok\n");
}

#[test]
fn test_progress_counter_on_terminal() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default()).interactive(true);
    let events = [
        ResultEvent::plan(4),
        ResultEvent::pass(1, ""),
        ResultEvent::pass(2, ""),
        ResultEvent::pass(3, ""),
        ResultEvent::pass(4, ""),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/foo.t"), &events);

    // Assert
    let erase = " ".repeat(1 + "t/foo.t .. ".len() + "/4 ".len() + 1);
    assert_eq!(
        sink.output(),
        format!(
            "t/foo.t .. \rt/foo.t .. 1/4 \rt/foo.t .. 2/4 \rt/foo.t .. 3/4 \rt/foo.t .. 4/4 \r{}\rt/foo.t .. ok\n",
            erase
        )
    );
}

#[test]
fn test_erase_covers_progress_line() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default()).interactive(true);

    // Act
    run_session(
        &mut sink,
        SessionArgs::new("t/foo.t"),
        &[ResultEvent::plan(4), ResultEvent::pass(1, "")],
    );

    // Assert
    let erase = sink
        .writes()
        .iter()
        .find(|w| w.text.starts_with("\r ") && w.text.ends_with("\rt/foo.t .. "))
        .expect("no erase write");
    let spaces = erase.text.trim_start_matches('\r').split('\r').next().unwrap();
    assert_eq!(spaces.len(), ".t/foo.t .. /4 1".len());
    assert!(spaces.chars().all(|c| c == ' '));
}

#[test]
fn test_progress_is_throttled() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default()).interactive(true);
    let mut events = vec![ResultEvent::plan(20)];
    events.extend((1..=20).map(|n| ResultEvent::pass(n, "")));

    // Act
    run_session(&mut sink, SessionArgs::new("t/big.t"), &events);

    // Assert
    let shown: Vec<String> = sink
        .writes()
        .iter()
        .filter(|w| w.text.starts_with("\rt/big.t .. "))
        .map(|w| w.text.trim_start_matches("\rt/big.t .. ").to_string())
        .collect();
    assert_eq!(
        shown,
        ["1/20 ", "2/20 ", "3/20 ", "4/20 ", "5/20 ", "6/20 ", "8/20 ", "10/20 ", "12/20 ", "16/20 ", "20/20 "]
    );
}

#[test]
fn test_unknown_plan_shows_zero() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default()).interactive(true);

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &[ResultEvent::pass(1, "")]);

    // Assert
    assert!(sink.output().contains("\rt/a.t .. 1/0 "));
}

#[test]
fn test_redirected_output_drops_redraws() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default());
    let events = [ResultEvent::plan(2), ResultEvent::pass(1, ""), ResultEvent::pass(2, "")];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t").show_count(true), &events);

    // Assert
    assert!(!sink.output().contains('\r'));
    assert_eq!(sink.output(), "t/a.t .. ok\n");
}

#[test]
fn test_failures_only_echoes_failures_once_newlined() {
    // Arrange
    let options = FormatterOptions {
        failures: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let events = [
        ResultEvent::plan(3),
        ResultEvent::fail(1, "- first"),
        ResultEvent::pass(2, ""),
        ResultEvent::fail(3, "- second"),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(
        sink.output(),
        "t/a.t .. \nnot ok 1 - first\nnot ok 3 - second\n Failed 2/3 subtests \n"
    );
}

#[test]
fn test_verbose_echoes_everything() {
    // Arrange
    let mut sink = MemorySink::new(options(Verbosity::Verbose)).interactive(true);
    let events = [ResultEvent::plan(2), ResultEvent::pass(1, ""), ResultEvent::pass(2, "")];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t").show_count(true), &events);

    // Assert
    assert_eq!(sink.output(), "t/a.t .. \n1..2\nok 1\nok 2\nok\n");
}

#[test]
fn test_verbose_with_failures_only_echoes_failures() {
    // Arrange
    let options = FormatterOptions {
        verbosity: Verbosity::Verbose,
        failures: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let events = [ResultEvent::plan(2), ResultEvent::pass(1, ""), ResultEvent::fail(2, "")];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.output(), "t/a.t .. \nnot ok 2\n Failed 1/2 subtests \n");
}

#[test]
fn test_quiet_suppresses_echo() {
    // Arrange
    let options = FormatterOptions {
        verbosity: Verbosity::Quiet,
        failures: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);

    // Act
    run_session(
        &mut sink,
        SessionArgs::new("t/a.t"),
        &[ResultEvent::plan(1), ResultEvent::fail(1, "")],
    );

    // Assert
    assert_eq!(sink.output(), "t/a.t ..  Failed 1/1 subtests \n");
}

#[test]
fn test_really_quiet_only_reports_bailout() {
    // Arrange
    let options = FormatterOptions {
        verbosity: Verbosity::ReallyQuiet,
        failures: true,
        directives: true,
        timer: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options).interactive(true);
    let events = [
        ResultEvent::plan(3),
        ResultEvent::pass(1, ""),
        ResultEvent::fail(2, ""),
        ResultEvent::pass(3, "").with_directive(Directive::Skip, "later"),
        ResultEvent::bailout("boom"),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.writes().len(), 1);
    assert_eq!(sink.writes()[0].channel, Channel::Failure);
    assert_eq!(sink.output(), "Bailout called. Further testing stopped: boom\n");
}

#[test]
fn test_bailout_goes_to_failure_channel() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default());

    // Act
    run_session(
        &mut sink,
        SessionArgs::new("t/a.t"),
        &[ResultEvent::plan(2), ResultEvent::bailout("no database")],
    );

    // Assert
    let failure = sink.channel_output(Channel::Failure);
    assert!(failure.starts_with("Bailout called. Further testing stopped: no database\n"));
}

#[test]
fn test_directives_are_echoed() {
    // Arrange
    let options = FormatterOptions {
        directives: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let events = [
        ResultEvent::plan(2),
        ResultEvent::pass(1, "").with_directive(Directive::Skip, "no net"),
        ResultEvent::pass(2, ""),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.output(), "t/a.t .. \nok 1 # SKIP no net\nok\n");
}

#[test]
fn test_comments_are_echoed() {
    // Arrange
    let options = FormatterOptions {
        comments: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let events = [
        ResultEvent::plan(1),
        ResultEvent::comment("connecting"),
        ResultEvent::pass(1, ""),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.output(), "t/a.t .. \n# connecting\nok\n");
}

#[test]
fn test_colors_follow_classification() {
    // Arrange
    let options = FormatterOptions {
        color: true,
        failures: true,
        directives: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let events = [
        ResultEvent::plan(3),
        ResultEvent::fail(1, ""),
        ResultEvent::pass(2, "").with_directive(Directive::Skip, "later"),
        ResultEvent::fail(3, "").with_directive(Directive::Todo, "soon"),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    let colors_of = |text: &str| {
        sink.writes()
            .iter()
            .find(|w| w.text == text)
            .map(|w| w.colors.clone())
            .expect("write not found")
    };
    assert_eq!(colors_of("not ok 1"), vec![Color::Red]);
    assert_eq!(colors_of("ok 2 # SKIP later"), vec![Color::White, Color::OnBlue]);
    assert_eq!(colors_of("not ok 3 # TODO soon"), vec![Color::Yellow]);
    assert!(sink
        .writes()
        .iter()
        .filter(|w| w.text == "\n")
        .all(|w| w.colors.is_empty()));
}

#[test]
fn test_no_colors_when_disabled() {
    // Arrange
    let options = FormatterOptions {
        failures: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);

    // Act
    run_session(
        &mut sink,
        SessionArgs::new("t/a.t"),
        &[ResultEvent::plan(1), ResultEvent::fail(1, "")],
    );

    // Assert
    assert!(sink.writes().iter().all(|w| w.colors.is_empty()));
}

#[test]
fn test_hires_timer_on_ok_line() {
    // Arrange
    let options = FormatterOptions {
        timer: true,
        hires_time: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let stats = RunStatistics {
        tests_planned: Some(1),
        tests_run: 1,
        passed: 1,
        start_time: Some(0.0),
        end_time: Some(1.234),
        ..Default::default()
    };

    // Act
    let mut session = Session::new(&mut sink, SessionArgs::new("t/a.t"));
    session.header().unwrap();
    session.result(&stats, &ResultEvent::pass(1, "")).unwrap();
    session.close(&stats).unwrap();

    // Assert
    assert_eq!(sink.output(), "t/a.t .. ok 1.234 s\n");
}

#[test]
fn test_whole_second_timer_under_a_second() {
    // Arrange
    let options = FormatterOptions {
        timer: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let stats = RunStatistics {
        start_time: Some(100.0),
        end_time: Some(100.0),
        ..Default::default()
    };

    // Act
    let mut session = Session::new(&mut sink, SessionArgs::new("t/a.t"));
    session.close(&stats).unwrap();

    // Assert
    assert_eq!(sink.output(), "ok       <1 s\n");
}

#[test]
fn test_timer_needs_both_timestamps() {
    // Arrange
    let options = FormatterOptions {
        timer: true,
        ..Default::default()
    };
    let mut sink = MemorySink::new(options);
    let stats = RunStatistics {
        start_time: Some(100.0),
        ..Default::default()
    };

    // Act
    let mut session = Session::new(&mut sink, SessionArgs::new("t/a.t"));
    session.close(&stats).unwrap();

    // Assert
    assert_eq!(sink.output(), "ok\n");
}

#[test]
fn test_skip_all_reports_reason() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default());

    // Act
    run_session(
        &mut sink,
        SessionArgs::new("t/a.t"),
        &[ResultEvent::skip_all("no database")],
    );

    // Assert
    assert_eq!(sink.output(), "t/a.t .. skipped: no database\n");
}

#[test]
fn test_missing_tests_produce_summary() {
    // Arrange
    let mut sink = MemorySink::new(FormatterOptions::default());
    let events = [
        ResultEvent::plan(5),
        ResultEvent::pass(1, ""),
        ResultEvent::fail(2, ""),
        ResultEvent::pass(3, ""),
    ];

    // Act
    run_session(&mut sink, SessionArgs::new("t/a.t"), &events);

    // Assert
    assert_eq!(sink.channel_output(Channel::Failure), " Failed 3/5 subtests ");
    assert_eq!(sink.output(), "t/a.t ..  Failed 3/5 subtests \n");
}
