//! TIL311 style hex font
//!
//! Each glyph is seven rows of four lit columns, bit 3 leftmost. The
//! shapes copy the Texas Instruments TIL311 hex display that sat on the
//! first Elf boards.

/// Glyph rows for 0x0..=0xF, top row first
pub const TIL311: [[u8; 7]; 16] = [
    [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110], // 0
    [0b0001, 0b0001, 0b0001, 0b0001, 0b0001, 0b0001, 0b0001], // 1
    [0b1110, 0b0001, 0b0001, 0b0110, 0b1000, 0b1000, 0b1111], // 2
    [0b1110, 0b0001, 0b0001, 0b0110, 0b0001, 0b0001, 0b1110], // 3
    [0b1000, 0b1001, 0b1001, 0b1111, 0b0001, 0b0001, 0b0001], // 4
    [0b1111, 0b1000, 0b1000, 0b1110, 0b0001, 0b0001, 0b1110], // 5
    [0b0110, 0b1000, 0b1000, 0b1110, 0b1001, 0b1001, 0b0110], // 6
    [0b1111, 0b0001, 0b0001, 0b0001, 0b0001, 0b0001, 0b0001], // 7
    [0b0110, 0b1001, 0b1001, 0b0110, 0b1001, 0b1001, 0b0110], // 8
    [0b0110, 0b1001, 0b1001, 0b0111, 0b0001, 0b0001, 0b0110], // 9
    [0b0110, 0b1001, 0b1001, 0b1111, 0b1001, 0b1001, 0b1001], // A
    [0b1110, 0b1001, 0b1001, 0b1110, 0b1001, 0b1001, 0b1110], // B
    [0b0111, 0b1000, 0b1000, 0b1000, 0b1000, 0b1000, 0b0111], // C
    [0b1110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b1110], // D
    [0b1111, 0b1000, 0b1000, 0b1111, 0b1000, 0b1000, 0b1111], // E
    [0b1111, 0b1000, 0b1000, 0b1110, 0b1000, 0b1000, 0b1000], // F
];

/// Glyph for the low four bits of `nibble`
pub fn glyph(nibble: u8) -> &'static [u8; 7] {
    &TIL311[usize::from(nibble & 0x0F)]
}

/// Mirror a five column row so column 0 becomes bit 0
pub const fn mirror_row(row: u8) -> u8 {
    (row & 0x1F).reverse_bits() >> 3
}

/// Rows of a glyph as seen by a row-major matrix (one byte per row,
/// leftmost column in bit 0)
pub fn rows(nibble: u8) -> [u8; 7] {
    (*glyph(nibble)).map(mirror_row)
}

/// Columns of a glyph as seen by a column-major matrix (one byte per
/// column, leftmost column first, top row in bit 0)
pub fn columns(nibble: u8) -> [u8; 5] {
    let glyph = glyph(nibble);
    let mut columns = [0u8; 5];
    for (x, column) in columns.iter_mut().enumerate() {
        for (y, row) in glyph.iter().enumerate() {
            if row & (0x10 >> x) != 0 {
                *column |= 1 << y;
            }
        }
    }
    columns
}
