//! Compact, URL-safe board strings.
//!
//! Layout before base64: one size byte, then the size² cell symbols in
//! row-major order compressed as raw deflate primed with [`DICTIONARY`].
//! Both sides must agree on the dictionary and level or strings produced by
//! other implementations stop matching byte for byte.

use std::str::FromStr;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::board::Board;
use crate::error::DecodeError;
use crate::stone::Cell;

/// Preset deflate dictionary: the Black, White and Empty symbols in that order.
pub const DICTIONARY: [u8; 3] = [Cell::Black as u8, Cell::White as u8, Cell::Empty as u8];

/// Deflate level used for every encoded board.
pub const COMPRESSION_LEVEL: u32 = 9;

/// URL-safe alphabet, padded on output, padding optional on input.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Serialize a board to its transport string.
pub fn encode(board: &Board) -> String {
    let symbols: Vec<u8> = board.cells().iter().map(|c| c.symbol()).collect();
    let mut data = Vec::with_capacity(symbols.len() / 4 + 16);
    data.push(board.size());
    deflate(&symbols, &mut data).expect("deflating into memory cannot fail");
    URL_SAFE.encode(data)
}

/// Rebuild a board from a string produced by [`encode`].
pub fn decode(s: &str) -> Result<Board, DecodeError> {
    let data = URL_SAFE.decode(s)?;
    let (&size, payload) = data.split_first().ok_or(DecodeError::MissingSize)?;
    let mut board = Board::new(size).map_err(|_| DecodeError::InvalidSize(size))?;

    let expected = board.cells().len();
    let symbols = inflate(payload, expected)?;
    if symbols.len() < expected {
        return Err(DecodeError::TruncatedStream {
            expected,
            found: symbols.len(),
        });
    }

    let width = size as usize;
    for (index, &symbol) in symbols.iter().take(expected).enumerate() {
        let cell = Cell::from_symbol(symbol).ok_or(DecodeError::UnknownSymbol { symbol, index })?;
        board.set_raw(((index % width) as u8, (index / width) as u8), cell);
    }

    tracing::debug!("decoded {size}x{size} board from {} bytes", data.len());
    Ok(board)
}

fn deflate(input: &[u8], out: &mut Vec<u8>) -> Result<(), flate2::CompressError> {
    let mut deflater = Compress::new(Compression::new(COMPRESSION_LEVEL), false);
    deflater.set_dictionary(&DICTIONARY)?;
    loop {
        let consumed = deflater.total_in() as usize;
        out.reserve(64);
        if deflater.compress_vec(&input[consumed..], out, FlushCompress::Finish)? == Status::StreamEnd {
            return Ok(());
        }
    }
}

/// Inflate at most `limit` bytes. A shorter result means the stream ran out.
fn inflate(payload: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let corrupt = |e: flate2::DecompressError| DecodeError::CorruptStream(e.to_string());

    let mut inflater = Decompress::new(false);
    inflater.set_dictionary(&DICTIONARY).map_err(corrupt)?;

    let mut out = Vec::with_capacity(limit);
    while out.len() < limit {
        let consumed = inflater.total_in() as usize;
        let produced = out.len();
        let status = inflater
            .decompress_vec(&payload[consumed..], &mut out, FlushDecompress::None)
            .map_err(corrupt)?;
        if status == Status::StreamEnd {
            break;
        }
        if inflater.total_in() as usize == consumed && out.len() == produced {
            break;
        }
    }
    Ok(out)
}

impl Board {
    pub fn encode(&self) -> String {
        encode(self)
    }

    pub fn decode(s: &str) -> Result<Board, DecodeError> {
        decode(s)
    }
}

impl FromStr for Board {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
