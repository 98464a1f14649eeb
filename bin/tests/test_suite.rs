use diagnostics::Diagnostics;
use itertools::Itertools;
use lazy_regex::regex;
use parser::AstPrinter;
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

/// Checks `code` against the annotations in its comments:
///
/// - `// expect: <tree>` the printed syntax tree
/// - `// Error...` an error reported on the comment's line
/// - `// [line N] Error...` an error reported on line N, for errors at the
///   end of the input
pub fn lox_expect(code: &str) {
    let mut expected_errors = vec![];
    let mut expected_output = vec![];

    let output_regex = regex!(r"// expect: (.*)");
    let error_regex = regex!(r"// (?:\[line (\d+)\] )?(Error.*)");

    for (i, line) in code.lines().enumerate() {
        if let Some(cap) = output_regex.captures(line) {
            expected_output.push(cap[1].to_string());
        } else if let Some(cap) = error_regex.captures(line) {
            let line = cap.get(1).map_or_else(|| (i + 1).to_string(), |l| l.as_str().to_string());
            expected_errors.push(format!("[line {line}] {}", &cap[2]));
        }
    }

    assert!(expected_output.len() <= 1, "A source holds a single expression");

    let mut diagnostics = Diagnostics::new();
    let output = parser::parse_source(code, &mut diagnostics).map(|expr| AstPrinter.print(&expr));

    assert_eq!(
        diagnostics.iter().map(|d| d.to_string()).collect_vec(),
        expected_errors,
        "Actual errors (left) do not match expected errors (right)"
    );
    assert_eq!(
        output.into_iter().collect_vec(),
        expected_output,
        "Actual output (left) does not match expected output (right)"
    );
}

generate_tests!();
