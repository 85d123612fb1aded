//! Tests for the line-buffered diagnostic sink.

use scenarist::TraceSink;

#[test]
fn partial_writes_accumulate_until_a_line_terminator() {
    let sink = TraceSink::with_prefix("testproc");
    sink.write("par");
    sink.write("tial\n");
    assert_eq!(sink.drain(), vec!["partial".to_owned()]);
}

#[test]
fn drain_flushes_the_buffered_residue() {
    let sink = TraceSink::with_prefix("testproc");
    sink.write("no terminator");
    assert_eq!(sink.drain(), vec!["no terminator".to_owned()]);
    assert!(sink.drain().is_empty(), "residue is flushed exactly once");
}

#[test]
fn one_write_may_carry_several_lines() {
    let sink = TraceSink::with_prefix("testproc");
    sink.write("a\nb\nc");
    sink.writeln("d");
    assert_eq!(
        sink.drain(),
        vec!["a".to_owned(), "b".to_owned(), "cd".to_owned()]
    );
}

#[test]
fn carriage_returns_are_trimmed_from_line_ends() {
    let sink = TraceSink::with_prefix("testproc");
    sink.write("windows line\r\n");
    assert_eq!(sink.drain(), vec!["windows line".to_owned()]);
}

#[test]
fn executable_name_prefix_is_stripped() {
    let sink = TraceSink::with_prefix("testproc");
    sink.writeln("testproc: warmed up");
    sink.writeln("unrelated output");
    assert_eq!(
        sink.drain(),
        vec!["warmed up".to_owned(), "unrelated output".to_owned()]
    );
}

#[test]
fn clones_share_one_capture() {
    let sink = TraceSink::with_prefix("testproc");
    let writer = sink.clone();
    writer.write("shared");
    writer.write(" buffer\n");
    assert_eq!(sink.drain(), vec!["shared buffer".to_owned()]);
}
