use crate::display::header_label;
use crate::filter::{
    DEVICE_HEADERS, ListView, USER_HEADERS, client_options, count_label, device_rows, user_rows,
};
use crate::helpers::truncate_text;
use crate::modal::DetailModal;
use crate::models::Dataset;
use crate::sort::{SortDirection, SortState, TableRow, sort_rows};
use crate::summary::{
    CLIENT_HEADERS, ChartSeries, ClientRow, Totals, alphabetical_clients, ranked_clients,
    top_clients,
};
use crate::tabs::{Tab, TabController};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind, poll,
    },
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row,
        Table, TableState, Tabs, Wrap,
    },
};
use std::io::{self, Write};
use std::panic;

const HIGHLIGHT_SYMBOL: &str = "► ";

/// A rendered table with its own sort state and selection
#[derive(Debug)]
struct DataTable {
    headers: &'static [&'static str],
    widths: Vec<Constraint>,
    rows: Vec<TableRow>,
    sort: SortState,
    state: TableState,
    area: Option<Rect>,
}

impl DataTable {
    fn new(
        headers: &'static [&'static str],
        widths: Vec<Constraint>,
        rows: Vec<TableRow>,
    ) -> Self {
        let mut state = TableState::default();
        if !rows.is_empty() {
            state.select(Some(0));
        }
        Self {
            headers,
            widths,
            rows,
            sort: SortState::default(),
            state,
            area: None,
        }
    }

    /// Replace the rows in source order; the sort state is kept
    fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        self.state
            .select(if self.rows.is_empty() { None } else { Some(0) });
    }

    fn sort_by(&mut self, column: usize) -> Option<SortDirection> {
        if column >= self.headers.len() {
            return None;
        }
        let direction = sort_rows(&mut self.rows, column, &mut self.sort)?;
        self.state.select(Some(0));
        Some(direction)
    }

    fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn selected_key(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .and_then(|row| row.key.as_deref())
    }

    /// Column whose header cell contains the given screen position
    fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        let inner = self.area?.inner(Margin::new(1, 1));
        if y != inner.y || inner.width <= 2 {
            return None;
        }
        let symbol_width = HIGHLIGHT_SYMBOL.chars().count() as u16;
        let columns_area = Rect {
            x: inner.x + symbol_width,
            width: inner.width - symbol_width,
            ..inner
        };
        Layout::horizontal(self.widths.clone())
            .spacing(1)
            .split(columns_area)
            .iter()
            .position(|col| x >= col.x && x < col.x + col.width)
    }
}

pub struct TuiApp<'a> {
    dataset: &'a Dataset,
    tabs: TabController,
    totals: Totals,
    overview: DataTable,
    users: DataTable,
    devices: DataTable,
    clients: DataTable,
    users_view: ListView,
    devices_view: ListView,
    client_options: Vec<String>,
    charts: (ChartSeries, ChartSeries),
    modal: DetailModal,
    modal_area: Option<Rect>,
    search_mode: bool,
    show_help_popup: bool,
    status_message: Option<String>,
    should_quit: bool,
}

impl<'a> TuiApp<'a> {
    pub fn new(dataset: &'a Dataset, initial_tab: Tab, chart_top_n: usize) -> Self {
        let client_widths = vec![
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ];
        let users_view = ListView::default();
        let devices_view = ListView::default();

        Self {
            dataset,
            tabs: TabController::new(initial_tab),
            totals: Totals::from_dataset(dataset, Local::now()),
            overview: DataTable::new(
                &CLIENT_HEADERS,
                client_widths.clone(),
                client_table_rows(ranked_clients(dataset)),
            ),
            users: DataTable::new(
                &USER_HEADERS,
                vec![
                    Constraint::Percentage(18),
                    Constraint::Percentage(22),
                    Constraint::Percentage(28),
                    Constraint::Percentage(32),
                ],
                user_rows(&users_view.users(dataset)),
            ),
            devices: DataTable::new(
                &DEVICE_HEADERS,
                vec![
                    Constraint::Percentage(30),
                    Constraint::Percentage(35),
                    Constraint::Percentage(35),
                ],
                device_rows(&devices_view.devices(dataset)),
            ),
            clients: DataTable::new(
                &CLIENT_HEADERS,
                client_widths,
                client_table_rows(alphabetical_clients(dataset)),
            ),
            users_view,
            devices_view,
            client_options: client_options(dataset),
            charts: top_clients(dataset, chart_top_n),
            modal: DetailModal::default(),
            modal_area: None,
            search_mode: false,
            show_help_popup: false,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        restore_screen(terminal.backend_mut())?;

        result
    }

    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if poll(std::time::Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.modal.is_visible() {
            self.handle_modal_input(key);
        } else if self.search_mode {
            self.handle_search_input(key);
        } else {
            self.handle_normal_input(key);
        }
    }

    fn handle_modal_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('x') | KeyCode::Enter) {
            self.modal.close();
            self.modal_area = None;
        }
    }

    fn handle_normal_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.tabs.select(Tab::ALL[index]);
            }
            KeyCode::Tab => self.tabs.next(),
            KeyCode::BackTab => self.tabs.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::PageDown => (0..10).for_each(|_| self.next_item()),
            KeyCode::PageUp => (0..10).for_each(|_| self.previous_item()),
            KeyCode::Char('/') => {
                if matches!(self.tabs.active(), Tab::Users | Tab::Devices) {
                    self.search_mode = true;
                    self.status_message =
                        Some("Search: type to filter (Esc to clear)".to_string());
                } else {
                    self.status_message =
                        Some("Search is available on Users and Devices".to_string());
                }
            }
            KeyCode::Char('c') if self.tabs.is_active(Tab::Users) => {
                self.users_view.cycle_client(&self.client_options);
                self.refresh_users();
                self.status_message =
                    Some(format!("Client filter: {}", self.users_view.client_label()));
            }
            KeyCode::F(n @ 1..=4) => self.sort_active_table(n as usize - 1),
            KeyCode::Enter => self.open_selected_client(),
            KeyCode::Char('?') => self.show_help_popup = !self.show_help_popup,
            _ => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.search_mode = false;
                if let Some(view) = self.active_view_mut() {
                    view.query.clear();
                }
                self.status_message = None;
            }
            KeyCode::Enter => {
                self.search_mode = false;
                let query = self
                    .active_view_mut()
                    .map(|v| v.query.clone())
                    .unwrap_or_default();
                self.status_message = Some(format!("Filtered by: '{}'", query));
                return;
            }
            KeyCode::Backspace => {
                if let Some(view) = self.active_view_mut() {
                    view.query.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(view) = self.active_view_mut() {
                    view.query.push(c);
                }
            }
            _ => return,
        }
        self.refresh_active_list();
    }

    fn active_view_mut(&mut self) -> Option<&mut ListView> {
        match self.tabs.active() {
            Tab::Users => Some(&mut self.users_view),
            Tab::Devices => Some(&mut self.devices_view),
            _ => None,
        }
    }

    fn active_table(&self) -> Option<&DataTable> {
        match self.tabs.active() {
            Tab::Overview => Some(&self.overview),
            Tab::Users => Some(&self.users),
            Tab::Devices => Some(&self.devices),
            Tab::Clients => Some(&self.clients),
            Tab::Charts => None,
        }
    }

    fn active_table_mut(&mut self) -> Option<&mut DataTable> {
        match self.tabs.active() {
            Tab::Overview => Some(&mut self.overview),
            Tab::Users => Some(&mut self.users),
            Tab::Devices => Some(&mut self.devices),
            Tab::Clients => Some(&mut self.clients),
            Tab::Charts => None,
        }
    }

    fn refresh_active_list(&mut self) {
        match self.tabs.active() {
            Tab::Users => self.refresh_users(),
            Tab::Devices => self.refresh_devices(),
            _ => {}
        }
    }

    fn refresh_users(&mut self) {
        let rows = user_rows(&self.users_view.users(self.dataset));
        self.users.set_rows(rows);
    }

    fn refresh_devices(&mut self) {
        let rows = device_rows(&self.devices_view.devices(self.dataset));
        self.devices.set_rows(rows);
    }

    fn sort_active_table(&mut self, column: usize) {
        let Some(table) = self.active_table_mut() else {
            return;
        };
        let message = match table.sort_by(column) {
            Some(direction) => Some(format!(
                "Sorted by: {} {}",
                table.headers[column],
                direction.arrow()
            )),
            None if column >= table.headers.len() => None,
            None => Some("Nothing to sort".to_string()),
        };
        self.status_message = message;
    }

    fn open_selected_client(&mut self) {
        let key = self
            .active_table()
            .and_then(|t| t.selected_key())
            .map(str::to_string);
        if let Some(client) = key {
            self.modal.open(self.dataset, &client);
        }
    }

    fn next_item(&mut self) {
        if let Some(table) = self.active_table_mut() {
            table.next();
        }
    }

    fn previous_item(&mut self) {
        if let Some(table) = self.active_table_mut() {
            table.previous();
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.modal.is_visible() {
                    let inside = self
                        .modal_area
                        .is_some_and(|area| contains(area, mouse.column, mouse.row));
                    if !inside {
                        self.modal.close();
                        self.modal_area = None;
                    }
                    return;
                }

                if mouse.row <= 2 {
                    if let Some(tab) = tab_at(mouse.column) {
                        self.tabs.select(tab);
                    }
                    return;
                }

                let column = self
                    .active_table()
                    .and_then(|t| t.column_at(mouse.column, mouse.row));
                if let Some(column) = column {
                    self.sort_active_table(column);
                }
            }
            MouseEventKind::ScrollUp if !self.modal.is_visible() => self.previous_item(),
            MouseEventKind::ScrollDown if !self.modal.is_visible() => self.next_item(),
            _ => {}
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let tabs = Tabs::new(TabController::titles())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("MSP Leadership Dashboard · {}", self.tabs.title())),
            )
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .select(self.tabs.active().index());
        f.render_widget(tabs, chunks[0]);

        match self.tabs.active() {
            Tab::Overview => self.render_overview(f, chunks[1]),
            Tab::Users => self.render_users(f, chunks[1]),
            Tab::Devices => self.render_devices(f, chunks[1]),
            Tab::Clients => render_table(f, chunks[1], &mut self.clients, "🏢 All Clients (A-Z)"),
            Tab::Charts => self.render_charts(f, chunks[1]),
        }

        self.render_status(f, chunks[2]);

        if self.modal.is_visible() {
            self.render_modal(f);
        }
        if self.show_help_popup {
            render_help_popup(f);
        }
    }

    fn render_overview(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let value_style = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let counters = vec![
            Line::from(vec![
                Span::styled("🏢 Clients: ", Style::default().fg(Color::White)),
                Span::styled(self.totals.total_clients.clone(), value_style(Color::Green)),
                Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
                Span::styled("👤 Licensed Users: ", Style::default().fg(Color::White)),
                Span::styled(
                    self.totals.total_users_licensed.clone(),
                    value_style(Color::Magenta),
                ),
                Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
                Span::styled("💻 Devices: ", Style::default().fg(Color::White)),
                Span::styled(self.totals.total_devices.clone(), value_style(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.totals.last_updated.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let summary = Paragraph::new(counters)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("📊 Summary")
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(summary, chunks[0]);

        render_table(
            f,
            chunks[1],
            &mut self.overview,
            "🏆 Clients by Licensed Users",
        );
    }

    fn render_users(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter_line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(self.search_text(&self.users_view), Style::default().fg(Color::White)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Client (c): ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.users_view.client_label().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                count_label(self.users.rows.len(), "users"),
                Style::default().fg(Color::Green),
            ),
        ]);
        f.render_widget(filter_bar(filter_line), chunks[0]);

        render_table(f, chunks[1], &mut self.users, "👤 Licensed Users");
    }

    fn render_devices(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter_line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.search_text(&self.devices_view),
                Style::default().fg(Color::White),
            ),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                count_label(self.devices.rows.len(), "devices"),
                Style::default().fg(Color::Green),
            ),
        ]);
        f.render_widget(filter_bar(filter_line), chunks[0]);

        render_table(f, chunks[1], &mut self.devices, "💻 Devices");
    }

    fn search_text(&self, view: &ListView) -> String {
        if self.search_mode {
            format!("{}█", view.query)
        } else if view.query.is_empty() {
            "(press /)".to_string()
        } else {
            view.query.clone()
        }
    }

    fn render_charts(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .margin(1)
            .split(area);

        render_bar_chart(f, chunks[0], &self.charts.0, Color::Blue);
        render_bar_chart(f, chunks[1], &self.charts.1, Color::Green);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match &self.status_message {
            Some(message) => (message.clone(), Color::Green),
            None => (
                "q Quit | Tab/1-5 Switch | j/k Move | / Search | c Client | F1-F4 Sort | Enter Details | ? Help"
                    .to_string(),
                Color::Gray,
            ),
        };
        let status = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status")
                    .border_style(Style::default().fg(color)),
            )
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        f.render_widget(status, area);
    }

    fn render_modal(&mut self, f: &mut Frame) {
        let area = f.area();
        let popup = Rect {
            x: area.width / 8,
            y: area.height / 8,
            width: area.width * 3 / 4,
            height: area.height * 3 / 4,
        };
        self.modal_area = Some(popup);

        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} (Esc to close)", self.modal.title()))
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(inner);

        let users = Paragraph::new(detail_lines(&self.modal.user_lines()))
            .block(Block::default().borders(Borders::ALL).title(format!(
                "👤 Licensed Users ({})",
                self.modal.users().len()
            )))
            .wrap(Wrap { trim: true });
        f.render_widget(users, halves[0]);

        let devices = Paragraph::new(detail_lines(&self.modal.device_lines()))
            .block(Block::default().borders(Borders::ALL).title(format!(
                "💻 Devices ({})",
                self.modal.devices().len()
            )))
            .wrap(Wrap { trim: true });
        f.render_widget(devices, halves[1]);
    }
}

/// Leave the alternate screen, stop mouse capture, and show the cursor
fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, cursor::Show)
}

/// Restore the terminal before the previous hook prints a panic
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = restore_screen(&mut io::stdout());
        previous(info);
    }));
}

fn client_table_rows(rows: Vec<ClientRow>) -> Vec<TableRow> {
    rows.iter().map(ClientRow::to_table_row).collect()
}

fn render_table(f: &mut Frame, area: Rect, table: &mut DataTable, title: &str) {
    table.area = Some(area);

    let header_cells = (0..table.headers.len()).map(|i| {
        Cell::from(header_label(table.headers[i], i, &table.sort)).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = table.rows.iter().map(|row| {
        Row::new(row.cells.iter().enumerate().map(|(i, text)| {
            let style = if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Cell::from(text.clone()).style(style)
        }))
        .height(1)
    });

    let widget = Table::new(rows, table.widths.clone())
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", title, table.rows.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);

    f.render_stateful_widget(widget, area, &mut table.state);
}

fn render_bar_chart(f: &mut Frame, area: Rect, series: &ChartSeries, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("📈 {}", series.title))
        .border_style(Style::default().fg(color));

    if series.values.is_empty() {
        f.render_widget(Paragraph::new("No data available").block(block), area);
        return;
    }

    let slots = series.values.len() as u16;
    let bar_width = (area.width.saturating_sub(2) / slots).saturating_sub(1).clamp(3, 16);
    let bars: Vec<Bar> = series
        .labels
        .iter()
        .zip(&series.values)
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(truncate_text(label, bar_width as usize)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block.title_bottom(series.label))
        .data(BarGroup::default().bars(&bars))
        .max(series.max())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    f.render_widget(chart, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 4,
        y: area.height / 4,
        width: area.width / 2,
        height: area.height / 2,
    };

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from("1-5 / Tab - Switch tab"),
        Line::from("j/k - Move selection"),
        Line::from("/ - Search (Users, Devices)"),
        Line::from("c - Cycle client filter (Users)"),
        Line::from("F1-F4 or click header - Sort column"),
        Line::from("Enter - Client details"),
        Line::from("q - Quit"),
        Line::from(""),
        Line::from("Press ? again to close"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quick Help")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black))
        .wrap(Wrap { trim: true });

    f.render_widget(popup, popup_area);
}

fn filter_bar(line: Line<'_>) -> Paragraph<'_> {
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("🔍 Filter")
            .border_style(Style::default().fg(Color::Cyan)),
    )
}

fn detail_lines(entries: &[Vec<String>]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        match entry.as_slice() {
            [only] => lines.push(Line::from(Span::styled(
                only.clone(),
                Style::default().fg(Color::DarkGray),
            ))),
            [head, rest @ ..] => {
                lines.push(Line::from(Span::styled(
                    head.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for part in rest {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", part),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
            [] => {}
        }
    }
    lines
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Tab under a click on the tab bar: " Title " segments joined by a 1-cell divider
fn tab_at(column: u16) -> Option<Tab> {
    let mut x = 1u16;
    for (tab, title) in Tab::ALL.iter().zip(TabController::titles()) {
        let width = title.chars().count() as u16 + 2;
        if column >= x && column < x + width {
            return Some(*tab);
        }
        x += width + 1;
    }
    None
}
