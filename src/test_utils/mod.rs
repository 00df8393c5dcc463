//! Shared test utilities for scout.

pub mod fixtures;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven tests, printing each case as it runs.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    for case in cases {
        let start = std::time::Instant::now();
        println!("[TEST] Running: {}", case.name);
        println!("[TEST] Input: {:?}", case.input);

        let actual = test_fn(case.input.clone());
        let elapsed = start.elapsed();

        println!("[TEST] Expected: {:?}", case.expected);
        println!("[TEST] Actual: {actual:?}");

        if actual != case.expected {
            return Err(format!(
                "Test '{}' failed: expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
        println!("[TEST] PASSED: {} ({:?})\n", case.name, elapsed);
    }
    Ok(())
}
