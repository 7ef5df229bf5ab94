use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_anagram-hunter"))
}

/// Write a word list into the temp directory, unique per test.
fn write_wordlist(name: &str, words: &[&str]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "anagram_hunter_{}_{}.txt",
        name,
        std::process::id()
    ));
    fs::write(&path, words.join("\n")).expect("Failed to write word list");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute anagram-hunter")
}

const WORDS: [&str; 14] = [
    "tutors", "printout", "it's", "stout", "Sprout", "yawls", "zebra", "ants", "poultry",
    "outwits", "stout", "wu", "lisp", "not",
];

#[test]
fn test_finds_known_phrase() {
    let wordlist = write_wordlist("finds_known_phrase", &WORDS);
    let output = run(&[wordlist.to_str().unwrap(), "3"]);
    let _ = fs::remove_file(&wordlist);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr),
        stdout
    );
    assert!(
        stdout.contains("SOLUTION: printout stout yawls e4820b45d2277f3844eac66c903e84be"),
        "Should report the matching ordering, got:\n{}",
        stdout
    );
    assert!(stdout.contains("Search Statistics"));
}

#[test]
fn test_counts_encoding_with_custom_digest() {
    let wordlist = write_wordlist("counts_encoding", &WORDS);
    let output = run(&[
        wordlist.to_str().unwrap(),
        "3",
        "--encoding",
        "counts",
        "--digest",
        "8b35bbd7ff2f5dd7c94fffbb1a3512bc",
        "-j",
        "2",
        "--verify-workers",
        "2",
    ]);
    let _ = fs::remove_file(&wordlist);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SOLUTION: poultry outwits ants 8b35bbd7ff2f5dd7c94fffbb1a3512bc"));
    assert!(stdout.contains("Encoding: counts"));
}

#[test]
fn test_no_solution_exits_cleanly() {
    let wordlist = write_wordlist("no_solution", &["ants", "poultry", "tutors"]);
    let output = run(&[wordlist.to_str().unwrap(), "3", "--exhaustive"]);
    let _ = fs::remove_file(&wordlist);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No solution found."));
}

#[test]
fn test_missing_arguments_exit_one() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Should print usage, got:\n{}", stderr);

    let output = run(&["words.txt"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_wordlist_is_reported() {
    let output = run(&["/definitely/not/a/wordlist.txt", "3"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read word list"));
}

#[test]
fn test_invalid_digest_is_reported() {
    let wordlist = write_wordlist("invalid_digest", &WORDS);
    let output = run(&[wordlist.to_str().unwrap(), "3", "--digest", "not-hex"]);
    let _ = fs::remove_file(&wordlist);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("control digest"));
}

#[test]
fn test_invalid_phrase_is_reported() {
    let wordlist = write_wordlist("invalid_phrase", &WORDS);
    let output = run(&[wordlist.to_str().unwrap(), "2", "--phrase", "Poultry Ants"]);
    let _ = fs::remove_file(&wordlist);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported symbol"));
}

#[test]
fn test_zero_workers_rejected() {
    let wordlist = write_wordlist("zero_workers", &WORDS);
    let path = wordlist.to_str().unwrap();
    let cases: [&[&str]; 3] = [
        &[path, "3", "-j", "0"],
        &[path, "3", "--verify-workers", "0"],
        &[path, "3", "--queue-capacity", "0"],
    ];
    let outputs: Vec<Output> = cases.iter().map(|args| run(args)).collect();
    let _ = fs::remove_file(&wordlist);

    for (args, output) in cases.iter().zip(&outputs) {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(output.status.code(), Some(1), "{:?} should fail", args);
        assert!(
            stderr.contains("configuration error"),
            "{:?} stderr: {}",
            args,
            stderr
        );
        assert!(
            !stdout.contains("Searching"),
            "{:?} started searching: {}",
            args,
            stdout
        );
    }
}
