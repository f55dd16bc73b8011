//! Interactive trade planner form using ratatui.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use planner_core::types::{InputField, PlanStatus, RawInputs, RiskMode, RiskSection};
use planner_risk::TradePlanner;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

use crate::report::{format_fixed, incomplete_summary};

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Quit,
}

/// Form state: the current input record and the plan derived from it.
pub struct FormState {
    planner: TradePlanner,
    inputs: RawInputs,
    status: PlanStatus,
    selected: usize,
    precision: u32,
}

impl FormState {
    /// Create a form with empty inputs.
    pub fn new(planner: TradePlanner, precision: u32) -> Self {
        Self::with_inputs(planner, RawInputs::new(), precision)
    }

    /// Create a form pre-filled with inputs.
    pub fn with_inputs(planner: TradePlanner, inputs: RawInputs, precision: u32) -> Self {
        let status = planner.evaluate(&inputs);
        Self {
            planner,
            inputs,
            status,
            selected: 0,
            precision,
        }
    }

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    pub fn status(&self) -> &PlanStatus {
        &self.status
    }

    pub fn mode(&self) -> RiskMode {
        self.planner.mode()
    }

    /// Fields shown in the current mode, in form order.
    pub fn fields(&self) -> Vec<InputField> {
        InputField::ALL
            .into_iter()
            .filter(|f| f.is_used_by(self.mode()))
            .collect()
    }

    pub fn selected_field(&self) -> InputField {
        let fields = self.fields();
        fields[self.selected.min(fields.len() - 1)]
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match key {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.selected = (self.selected + 1) % self.fields().len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.fields().len();
                self.selected = (self.selected + len - 1) % len;
            }
            KeyCode::F(2) => {
                let next = match self.mode() {
                    RiskMode::AllocationTable => RiskMode::FixedRisk,
                    RiskMode::FixedRisk => RiskMode::AllocationTable,
                };
                self.planner = self.planner.clone().with_mode(next);
                self.selected = self.selected.min(self.fields().len() - 1);
                self.recompute();
            }
            KeyCode::Backspace => {
                let mut text = self.current_text().to_string();
                text.pop();
                self.set_current(text);
            }
            KeyCode::Delete => self.set_current(String::new()),
            KeyCode::Char(c) if is_numeric_char(c) => {
                let mut text = self.current_text().to_string();
                text.push(c);
                self.set_current(text);
            }
            _ => {}
        }
        FormAction::Continue
    }

    fn current_text(&self) -> &str {
        self.inputs.get(self.selected_field())
    }

    fn set_current(&mut self, text: String) {
        self.inputs = self.inputs.with_field(self.selected_field(), text);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.status = self.planner.evaluate(&self.inputs);
        debug!(ready = self.status.is_ready(), "Form recomputed");
    }
}

/// Characters a numeric input accepts.
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Terminal front end for [`FormState`].
pub struct PlannerForm;

impl PlannerForm {
    /// Run the form until the user quits. Returns the final inputs.
    pub fn run(mut state: FormState) -> io::Result<RawInputs> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = Self::run_loop(&mut terminal, &mut state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res.map(|_| state.inputs)
    }

    fn run_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        state: &mut FormState,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| Self::ui(f, state))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && state.handle_key(key.code) == FormAction::Quit {
                    return Ok(());
                }
            }
        }
    }

    fn ui(frame: &mut Frame, state: &FormState) {
        let fields = state.fields();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),                       // Header
                Constraint::Length(fields.len() as u16 + 2), // Inputs
                Constraint::Length(4),                       // Exits
                Constraint::Min(6),                          // Risk
            ])
            .split(frame.area());

        Self::render_header(frame, chunks[0], state);
        Self::render_inputs(frame, chunks[1], state, &fields);

        match state.status() {
            PlanStatus::Ready(_) => {
                Self::render_exits(frame, chunks[2], state);
                Self::render_risk(frame, chunks[3], state);
            }
            status @ PlanStatus::Incomplete { .. } => {
                let text = incomplete_summary(status).unwrap_or_default();
                let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
                let area = Rect {
                    height: chunks[2].height + chunks[3].height,
                    ..chunks[2]
                };
                let paragraph = Paragraph::new(lines)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL).title("Plan"));
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &FormState) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Trade Planner",
                Style::default()
                    .fg(Color::Rgb(249, 115, 22))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | mode: "),
            Span::styled(state.mode().to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(" | Tab: next  F2: mode  Del: clear  Esc: quit"),
        ])])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_inputs(frame: &mut Frame, area: Rect, state: &FormState, fields: &[InputField]) {
        let selected = state.selected_field();
        let lines: Vec<Line> = fields
            .iter()
            .map(|field| {
                let style = if *field == selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if *field == selected { "> " } else { "  " };
                Line::from(vec![
                    Span::styled(format!("{}{:<22}", marker, field.label()), style),
                    Span::raw(state.inputs().get(*field).to_string()),
                ])
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Inputs"));
        frame.render_widget(paragraph, area);
    }

    fn render_exits(frame: &mut Frame, area: Rect, state: &FormState) {
        let Some(plan) = state.status().plan() else {
            return;
        };
        let p = state.precision;

        let exits = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Stop Loss: "),
                Span::styled(
                    format!("${}", format_fixed(plan.stop_loss.price, p)),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ({})", plan.stop_loss_label())),
            ]),
            Line::from(vec![
                Span::raw("Profit Target: "),
                Span::styled(
                    format!("${}", format_fixed(plan.profit_target, p)),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ({}:1 ratio)", plan.inputs.profit_ratio.normalize())),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Exits"));
        frame.render_widget(exits, area);
    }

    fn render_risk(frame: &mut Frame, area: Rect, state: &FormState) {
        let Some(plan) = state.status().plan() else {
            return;
        };
        let p = state.precision;

        match &plan.risk {
            RiskSection::AllocationTable { rows } => {
                let header_cells = ["Allocation", "Shares", "Risk", "Risk %"]
                    .iter()
                    .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
                let header = Row::new(header_cells).height(1);

                let rows = rows.iter().map(|row| {
                    Row::new(vec![
                        Cell::from(format!("{}%", row.allocation_pct.normalize())),
                        Cell::from(format_fixed(row.shares, p)),
                        Cell::from(format!("${}", format_fixed(row.risk_amount, p))),
                        Cell::from(format!("{}%", format_fixed(row.risk_pct_of_portfolio, p))),
                    ])
                });

                let table = Table::new(
                    rows,
                    [
                        Constraint::Percentage(25),
                        Constraint::Percentage(25),
                        Constraint::Percentage(25),
                        Constraint::Percentage(25),
                    ],
                )
                .header(header)
                .block(Block::default().borders(Borders::ALL).title("Position Size"));

                frame.render_widget(table, area);
            }
            RiskSection::FixedRisk(fixed) => {
                let shares = fixed
                    .shares_at_risk
                    .map(|s| format_fixed(s, p))
                    .unwrap_or_else(|| "n/a".to_string());
                let paragraph = Paragraph::new(vec![
                    Line::from(format!("Risk Percentage: {}%", fixed.risk_pct.normalize())),
                    Line::from(format!("Risk Amount: ${}", format_fixed(fixed.risk_amount, p))),
                    Line::from(format!("Shares at Risk: {}", shares)),
                ])
                .block(Block::default().borders(Borders::ALL).title("Risk"));
                frame.render_widget(paragraph, area);
            }
        }
    }
}
