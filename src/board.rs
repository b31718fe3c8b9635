use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{evaluator::Evaluator, HEIGHT, NUM_DIAGONALS, WIDTH};

/// A player's mark
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token {
    X,
    O,
}

/// Both tokens, ordered by seat
pub const TOKENS: [Token; 2] = [Token::X, Token::O];

impl Token {
    pub fn other(self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    /// The seat of this token, X moves from seat 0
    pub fn seat(self) -> usize {
        match self {
            Token::X => 0,
            Token::O => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Token::X => 'X',
            Token::O => 'O',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Filled(Token),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn token(&self) -> Option<Token> {
        match self {
            Cell::Filled(token) => Some(*token),
            Cell::Empty => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Filled(token) => token.symbol(),
            Cell::Empty => ' ',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Token),
    Draw,
}

/// A column, row or diagonal of the board, read in a fixed direction
#[derive(Copy, Clone, Debug)]
pub struct Line {
    cells: [Cell; WIDTH],
    len: usize,
}

impl Line {
    fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH],
            len: 0,
        }
    }

    fn push(&mut self, cell: Cell) {
        self.cells[self.len] = cell;
        self.len += 1;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// The state of a single game
///
/// Columns are stored left-to-right, each one bottom-to-top. A winner is
/// recorded by the move that completes a line and is never cleared.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    grid: [[Cell; HEIGHT]; WIDTH],
    heights: [usize; WIDTH],
    column_open: [bool; WIDTH],
    turn: usize,
    winner: Option<Token>,
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; HEIGHT]; WIDTH],
            heights: [0; WIDTH],
            column_open: [true; WIDTH],
            turn: 0,
            winner: None,
            num_moves: 0,
        }
    }

    /// Creates an empty board where `token` makes the first move
    pub fn with_first_player(token: Token) -> Self {
        Self {
            turn: token.seat(),
            ..Self::new()
        }
    }

    /// Builds a board from a string of 1-indexed column digits, X moving first
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    board.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Plays a 1-indexed column, rejecting moves that the board can't accept
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if self.is_game_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }
        let column = column_one_indexed - 1;
        if !self.is_valid_move(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.play(column);
        Ok(self.state())
    }

    /// Drops the current player's token into `column`
    ///
    /// # Panics
    /// If `column` is out of range or already full
    pub fn play(&mut self, column: usize) {
        assert!(
            self.is_valid_move(column),
            "column {} is not a valid move",
            column
        );
        let token = self.to_move();

        if self.winner.is_none() && self.check_winning_move(column) {
            self.winner = Some(token);
        }

        self.grid[column][self.heights[column]] = Cell::Filled(token);
        self.heights[column] += 1;
        if self.heights[column] == HEIGHT {
            self.column_open[column] = false;
        }
        self.num_moves += 1;
        self.turn = (self.turn + 1) % 2;
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < WIDTH && self.column_open[column]
    }

    /// Open columns, left to right
    pub fn valid_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.column_open[column])
    }

    pub fn is_full(&self) -> bool {
        self.column_open.iter().all(|open| !open)
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    pub fn state(&self) -> GameState {
        match self.winner {
            Some(token) => GameState::Won(token),
            None if self.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }

    pub fn winner(&self) -> Option<Token> {
        self.winner
    }

    /// The token that will be placed by the next move
    pub fn to_move(&self) -> Token {
        TOKENS[self.turn]
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.grid[column][row]
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Heuristic value of the position for `token` using the default score table
    pub fn evaluate(&self, token: Token) -> i32 {
        Evaluator::default().evaluate(self, token)
    }

    /// Every column, row and diagonal of the board
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        let columns = (0..WIDTH).map(move |column| self.walk(column as isize, 0, 0, 1));
        let rows = (0..HEIGHT).map(move |row| self.walk(0, row as isize, 1, 0));
        // start on the top or right edge and walk down-left
        let anti_diagonals = (0..NUM_DIAGONALS).map(move |i| {
            let column = i.min(WIDTH - 1);
            let row = i.saturating_sub(WIDTH - 1);
            self.walk(column as isize, row as isize, -1, 1)
        });
        let diagonals = (0..NUM_DIAGONALS).map(move |i| {
            let column = i.min(WIDTH - 1);
            let row = (HEIGHT - 1) - i.saturating_sub(WIDTH - 1);
            self.walk(column as isize, row as isize, -1, -1)
        });
        columns.chain(rows).chain(anti_diagonals).chain(diagonals)
    }

    fn walk(&self, mut column: isize, mut row: isize, d_column: isize, d_row: isize) -> Line {
        let mut line = Line::new();
        while column >= 0 && column < WIDTH as isize && row >= 0 && row < HEIGHT as isize {
            line.push(self.grid[column as usize][row as usize]);
            column += d_column;
            row += d_row;
        }
        line
    }

    /// Draws the board in colour at the cursor position
    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (column, cells) in self.grid.iter().enumerate() {
            for (row, cell) in cells.iter().enumerate() {
                let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match cell {
                                Cell::Filled(Token::X) => Color::Red,
                                Cell::Filled(Token::O) => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }

    // checks if dropping the current player's token in `column` completes a line
    fn check_winning_move(&self, column: usize) -> bool {
        let player = Cell::Filled(self.to_move());
        let height = self.heights[column];

        // check vertical alignment
        if height >= 3
            && self.grid[column][height - 1] == player
            && self.grid[column][height - 2] == player
            && self.grid[column][height - 3] == player
        {
            return true;
        }

        // check horizontal and diagonal alignment
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = height as i32 + dx * dy_dx;
                loop {
                    if x < 0
                        || x >= WIDTH as i32
                        || y < 0
                        || y >= HEIGHT as i32
                        || self.grid[x as usize][y as usize] != player
                    {
                        break;
                    }
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= 3 {
                return true;
            }
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "+---".repeat(WIDTH) + "+";

        for column in 1..=WIDTH {
            write!(f, "  {} ", column)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", separator)?;

        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                write!(f, "| {} ", self.grid[column][row].symbol())?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", separator)?;
        }
        Ok(())
    }
}
