//! Hex entry buffer
//!
//! Collects nibbles typed on the keypad. Two nibbles make a data byte;
//! in address entry four nibbles (two pairs) make a 16-bit address.

/// Which half of the current pair the next nibble fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    ExpectHigh,
    ExpectLow,
}

/// Where completed pairs go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryTarget {
    /// Data byte for the switches
    Data,
    /// Bits 8-15 of the address
    AddressHigh,
    /// Bits 0-7 of the address
    AddressLow,
}

/// Result of feeding one nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Entry {
    /// First nibble of a pair stored
    Pending,
    /// Data pair complete
    Byte(u8),
    /// Address pair complete, live accumulator value
    Address(u16),
}

/// Nibble accumulator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HexEntryBuffer {
    value: u16,
    parity: Parity,
    target: EntryTarget,
}

impl Default for HexEntryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HexEntryBuffer {
    /// Empty buffer expecting the high nibble of a data byte
    pub const fn new() -> Self {
        Self {
            value: 0,
            parity: Parity::ExpectHigh,
            target: EntryTarget::Data,
        }
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn target(&self) -> EntryTarget {
        self.target
    }

    /// True when half of a pair has been typed
    pub fn is_pending(&self) -> bool {
        self.parity == Parity::ExpectLow
    }

    /// Live 16-bit address accumulator
    pub fn address(&self) -> u16 {
        self.value
    }

    /// Start a four-nibble address entry from the current address
    pub fn begin_address(&mut self, current: u16) {
        self.value = current;
        self.parity = Parity::ExpectHigh;
        self.target = EntryTarget::AddressHigh;
    }

    /// Drop any partial entry and go back to data entry
    ///
    /// No completion is reported for the discarded nibble.
    pub fn abandon(&mut self) {
        *self = Self::new();
    }

    /// Feed one nibble; only the low four bits are used
    pub fn feed(&mut self, nibble: u8) -> Entry {
        let nibble = u16::from(nibble & 0x0F);

        match self.target {
            EntryTarget::Data => match self.parity {
                Parity::ExpectHigh => {
                    self.value = nibble << 4;
                    self.parity = Parity::ExpectLow;
                    Entry::Pending
                }
                Parity::ExpectLow => {
                    let byte = (self.value | nibble) as u8;
                    self.value = 0;
                    self.parity = Parity::ExpectHigh;
                    Entry::Byte(byte)
                }
            },
            EntryTarget::AddressHigh | EntryTarget::AddressLow => {
                let base = if self.target == EntryTarget::AddressHigh {
                    8
                } else {
                    0
                };
                let shift = match self.parity {
                    Parity::ExpectHigh => base + 4,
                    Parity::ExpectLow => base,
                };
                self.value = (self.value & !(0x0F << shift)) | (nibble << shift);

                match self.parity {
                    Parity::ExpectHigh => {
                        self.parity = Parity::ExpectLow;
                        Entry::Pending
                    }
                    Parity::ExpectLow => {
                        self.parity = Parity::ExpectHigh;
                        self.target = match self.target {
                            EntryTarget::AddressHigh => EntryTarget::AddressLow,
                            _ => EntryTarget::AddressHigh,
                        };
                        Entry::Address(self.value)
                    }
                }
            }
        }
    }
}
