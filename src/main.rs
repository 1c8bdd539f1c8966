use clap::{Parser, Subcommand};
use lexnum::cli;
use lexnum::error::LexNumResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexnum")]
#[command(about = "Convert monetary amounts to formal written Spanish (PESOS M.N.)")]
#[command(long_about = "LexNum - Amounts in formal Spanish text
1523.45 → MIL QUINIENTOS VEINTITRÉS PESOS 45/100 M.N.

COMMANDS:
  convert   - Convert one or more amounts
  excel     - Add a 'Texto' column to a spreadsheet
  columns   - Show headers and the detected amount column

EXAMPLES:
  lexnum convert 1523.45                 # Single amount
  lexnum convert '$1,320.00' 21000 0.5   # Several amounts, one per line
  lexnum excel montos.xlsx               # Writes montos_texto.xlsx
  lexnum excel montos.xlsx out.xlsx --column Importe

Start the HTTP API with lexnum-server.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert amounts to formal Spanish currency text.

Accepts plain numbers and common decorations: $, MXN, M.N., MN and
thousands separators are removed before parsing. Amounts are rounded
half-up to cents.

Every amount is processed; the command exits non-zero if any failed.

EXAMPLES:
  lexnum convert 1
  → UN PESO 00/100 M.N.

  lexnum convert 1000000
  → UN MILLÓN PESOS 00/100 M.N.")]
    /// Convert one or more amounts
    Convert {
        /// Amounts to convert
        #[arg(required = true, allow_hyphen_values = true)]
        amounts: Vec<String>,

        /// Largest integer part accepted (default: 999999999)
        #[arg(long, env = "LEXNUM_MAX_PESOS")]
        max_pesos: Option<u64>,
    },

    #[command(long_about = "Convert the amount column of a spreadsheet.

Reads the first worksheet of an .xlsx/.xls file, finds the amount column
('Número', 'Numero' or 'Num', ignoring case, accents and spaces) and writes
a copy with a 'Texto' column holding the converted text.

Rows that cannot be converted are left blank in 'Texto' and explained in an
extra 'Error' column; they never stop the rest of the file.

EXAMPLES:
  lexnum excel montos.xlsx
  lexnum excel montos.xlsx salida.xlsx --column \"Importe Total\"")]
    /// Add a 'Texto' column to a spreadsheet
    Excel {
        /// Input Excel file (.xlsx or .xls)
        input: PathBuf,

        /// Output Excel file (default: <input>_texto.xlsx)
        output: Option<PathBuf>,

        /// Amount column name (overrides detection)
        #[arg(short, long)]
        column: Option<String>,

        /// Largest integer part accepted (default: 999999999)
        #[arg(long, env = "LEXNUM_MAX_PESOS")]
        max_pesos: Option<u64>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show headers and the detected amount column
    Columns {
        /// Input Excel file (.xlsx or .xls)
        input: PathBuf,
    },
}

fn main() -> LexNumResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { amounts, max_pesos } => cli::convert(amounts, max_pesos),

        Commands::Excel {
            input,
            output,
            column,
            max_pesos,
            verbose,
        } => cli::excel(input, output, column, max_pesos, verbose),

        Commands::Columns { input } => cli::columns(input),
    }
}
