//! Crossword UI scenarios.
//!
//! Each scenario assumes `open_app()` already ran, so the application talks
//! to the stub server, and checks that the stub's canned data reaches the page.

use crate::routing::RouteTable;
use crate::scenario::browser::{Browser, Locator};
use crate::scenario::driver::ScenarioDriver;
use crate::scenario::keys::{shift_tab, Key};
use crate::scenario::ScenarioError;

pub const WIDTH_INPUT: &str = "width";
pub const HEIGHT_INPUT: &str = "height";
pub const CELL_CLASS: &str = "cell";
pub const WORD_CLASS: &str = "word";
pub const MORE_WORDS_BUTTON: &str = "more-words";
pub const SOLVE_BUTTON: &str = "solve";

/// Word-completion request the application sends for `pattern`.
pub fn word_query_path(pattern: &str, page: u32) -> String {
    format!("/words?word={pattern}&page={page}")
}

/// Solver request for a grid; rows are joined by an encoded newline.
pub fn solve_query_path(rows: &[&str]) -> String {
    format!("/solve?crossword={}", rows.join("%0A"))
}

fn canned_body(table: &RouteTable, path: &str) -> Result<String, ScenarioError> {
    table
        .lookup(path)
        .map(|canned| String::from_utf8_lossy(&canned.body).into_owned())
        .ok_or_else(|| ScenarioError::MissingRoute(path.to_string()))
}

/// Words the stub returns for one page of `pattern`.
pub fn canned_words(table: &RouteTable, pattern: &str, page: u32) -> Result<Vec<String>, ScenarioError> {
    let body = canned_body(table, &word_query_path(pattern, page))?;
    Ok(body.split_whitespace().map(str::to_string).collect())
}

/// Solved rows the stub returns for `rows`.
pub fn canned_solution(table: &RouteTable, rows: &[&str]) -> Result<Vec<String>, ScenarioError> {
    let body = canned_body(table, &solve_query_path(rows))?;
    Ok(body.lines().map(str::to_string).collect())
}

/// Set the grid dimensions and wait for the matching number of cells.
pub async fn grid_resize<B: Browser>(
    driver: &ScenarioDriver<B>,
    width: usize,
    height: usize,
) -> Result<(), ScenarioError> {
    driver.set_input(&Locator::id(WIDTH_INPUT), &width.to_string()).await?;
    driver.set_input(&Locator::id(HEIGHT_INPUT), &height.to_string()).await?;
    driver
        .wait_for_count(&Locator::class(CELL_CLASS), width * height)
        .await?;
    tracing::info!(width, height, "Grid resized");
    Ok(())
}

/// Select the first across slot of an empty 3x3 grid, page through its
/// completions, then narrow the pattern and page past the last result.
pub async fn word_list_pagination<B: Browser>(
    driver: &ScenarioDriver<B>,
    table: &RouteTable,
) -> Result<(), ScenarioError> {
    let words = Locator::class(WORD_CLASS);
    let more = Locator::id(MORE_WORDS_BUTTON);

    grid_resize(driver, 3, 3).await?;
    driver.click(&Locator::class(CELL_CLASS)).await?;

    let mut expected = canned_words(table, "...", 0)?;
    driver.wait_for_texts(&words, &expected).await?;

    driver.click(&more).await?;
    expected.extend(canned_words(table, "...", 1)?);
    driver.wait_for_texts(&words, &expected).await?;

    // Paging moved focus to the button; type into the first cell again.
    driver.click(&Locator::class(CELL_CLASS)).await?;
    driver.press("H").await?;
    let mut expected = canned_words(table, "H..", 0)?;
    driver.wait_for_texts(&words, &expected).await?;

    // Last page is empty; the list must stay as it is.
    driver.click(&more).await?;
    expected.extend(canned_words(table, "H..", 1)?);
    driver.wait_for_texts(&words, &expected).await?;

    tracing::info!("Word list pagination verified");
    Ok(())
}

/// Tab from the width input through height into the grid, then back.
pub async fn focus_traversal<B: Browser>(driver: &ScenarioDriver<B>) -> Result<(), ScenarioError> {
    grid_resize(driver, 3, 3).await?;

    driver.click(&Locator::id(WIDTH_INPUT)).await?;
    driver.wait_for_focus(&Locator::id(WIDTH_INPUT)).await?;

    let tab = Key::Tab.to_string();
    driver.press(&tab).await?;
    driver.wait_for_focus(&Locator::id(HEIGHT_INPUT)).await?;

    driver.press(&tab).await?;
    driver.wait_for_focus(&Locator::class(CELL_CLASS)).await?;

    driver.press(&shift_tab()).await?;
    driver.wait_for_focus(&Locator::id(HEIGHT_INPUT)).await?;

    tracing::info!("Focus traversal verified");
    Ok(())
}

/// Ask the solver to fill an empty 3x3 grid and check every cell.
pub async fn solve_grid<B: Browser>(
    driver: &ScenarioDriver<B>,
    table: &RouteTable,
) -> Result<(), ScenarioError> {
    grid_resize(driver, 3, 3).await?;
    driver.click(&Locator::id(SOLVE_BUTTON)).await?;

    let letters: Vec<String> = canned_solution(table, &["...", "...", "..."])?
        .iter()
        .flat_map(|row| row.chars().map(String::from).collect::<Vec<_>>())
        .collect();
    driver
        .wait_for_values(&Locator::class(CELL_CLASS), &letters)
        .await?;

    tracing::info!("Solved grid verified");
    Ok(())
}
