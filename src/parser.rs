//! The byte-driven state machine. Classifies each input byte into an event
//! class (`classify`) and advances a small transient state record one byte
//! at a time, committing address components, the CIDR mask, the port, and
//! the zone as their enclosing tokens close.

use crate::classify::{classify, EventClass};
use crate::error::{DiagEvent, DiagKind};
use crate::numeric::{decimal, hexadecimal};
use crate::{Address, Flags};

#[cfg(feature = "trace")]
macro_rules! trace_transition {
    ($state:expr, $event:expr) => {
        log::trace!("state {:?} <- event {:?}", $state, $event)
    };
}
#[cfg(not(feature = "trace"))]
macro_rules! trace_transition {
    ($state:expr, $event:expr) => {};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    AddrComponent,
    V6Separator,
    Cidr,
    Iface,
    PostAddr,
    Port,
    Error,
}

mod flag {
    //Transient parser-state flags, distinct from the public `Flags` on `Address`.
    pub(super) const ZERORUN: u8 = 0b001;
    pub(super) const IPV4_EMBEDDING: u8 = 0b010;
}

struct Parser<'i, 'o, F> {
    state: State,
    input: &'i [u8],
    position: usize,
    token_position: usize,
    token_len: usize,
    components: u8,
    brackets: u8,
    zerorun: u8,
    v4_embedding: u8,
    v4_octets: u8,
    flags: u8,
    out: &'o mut Address,
    diag: F,
    errored: bool,
}

impl<'i, 'o, F> Parser<'i, 'o, F>
where
    F: FnMut(DiagEvent<'i>),
{
    fn error(&mut self, kind: DiagKind) {
        if !self.errored {
            self.errored = true;
            (self.diag)(DiagEvent::new(kind, self.input, self.position));
        }
        self.state = State::Error;
    }

    #[inline]
    fn begin_token(&mut self, offset: usize) {
        self.token_position = self.position + offset;
        self.token_len = 0;
    }

    fn token_checked(&mut self, bounds_kind: DiagKind) -> Option<&'i [u8]> {
        let end = self.token_position + self.token_len;
        if self.token_position > self.input.len() || end > self.input.len() {
            self.error(bounds_kind);
            return None;
        }
        Some(&self.input[self.token_position..end])
    }

    fn commit_component(&mut self) {
        if self.flags & flag::IPV4_EMBEDDING != 0 {
            self.commit_v4_octet();
        } else {
            self.commit_v6_component();
        }
    }

    fn commit_v6_component(&mut self) {
        let Some(token) = self.token_checked(DiagKind::InvalidHexToken) else {
            return;
        };
        let value = match hexadecimal(token) {
            Ok(value) => value,
            Err(kind) => return self.error(kind),
        };
        if self.components >= 8 {
            return self.error(DiagKind::V6BadComponentCount);
        }
        if !(0..=0xffff).contains(&value) {
            return self.error(DiagKind::V6ComponentOutOfRange);
        }
        self.out.components[self.components as usize] = value as u16;
        self.components += 1;
        self.token_position = 0;
        self.token_len = 0;
    }

    fn commit_v4_octet(&mut self) {
        let Some(token) = self.token_checked(DiagKind::InvalidDecimalToken) else {
            return;
        };
        let value = match decimal(token) {
            Ok(value) => value,
            Err(kind) => return self.error(kind),
        };
        if self.v4_octets >= 4 {
            return self.error(DiagKind::V4BadComponentCount);
        }
        if !(0..=0xff).contains(&value) {
            return self.error(DiagKind::V4ComponentOutOfRange);
        }

        //Widen into the correct half of the two reserved 16-bit slots,
        //preserving wire order independently of host endianness.
        let slot = self.v4_embedding as usize + (self.v4_octets as usize) / 2;
        let existing = self.out.components[slot];
        let updated = if self.v4_octets % 2 == 0 {
            (existing & 0x00ff) | ((value as u16) << 8)
        } else {
            (existing & 0xff00) | (value as u16)
        };
        self.out.components[slot] = updated;
        self.v4_octets += 1;
        self.token_position = 0;
        self.token_len = 0;
    }

    fn commit_cidr(&mut self) {
        let Some(token) = self.token_checked(DiagKind::InvalidDecimalToken) else {
            return;
        };
        let value = match decimal(token) {
            Ok(value) => value,
            Err(kind) => return self.error(kind),
        };
        if !(0..=128).contains(&value) {
            return self.error(DiagKind::InvalidCidrMask);
        }
        self.out.mask = value as u8;
        self.out.flags.insert(Flags::HAS_MASK);
        self.token_position = 0;
        self.token_len = 0;
    }

    fn commit_port(&mut self) {
        let Some(token) = self.token_checked(DiagKind::InvalidDecimalToken) else {
            return;
        };
        let value = match decimal(token) {
            Ok(value) => value,
            Err(kind) => return self.error(kind),
        };
        if !(0..=0xffff).contains(&value) {
            return self.error(DiagKind::InvalidPort);
        }
        self.out.port = value as u16;
        self.out.flags.insert(Flags::HAS_PORT);
        self.token_position = 0;
        self.token_len = 0;
    }

    fn push_zone_byte(&mut self) {
        let byte = self.input[self.position];
        self.out.zone.push(byte);
    }

    fn dispatch(&mut self, event: EventClass) {
        trace_transition!(self.state, event);
        use EventClass::*;

        match self.state {
            State::Error => {}

            State::None => match event {
                Digit | HexDigit => {
                    self.state = State::AddrComponent;
                    self.begin_token(0);
                    self.token_len += 1;
                }
                OpenBracket => {
                    if self.brackets != 1 {
                        self.error(DiagKind::InvalidBrackets);
                    }
                }
                CloseBracket => self.state = State::PostAddr,
                V6Sep => self.state = State::V6Separator,
                Cidr => {
                    self.state = State::Cidr;
                    self.begin_token(1);
                }
                Whitespace => {}
                V4Sep | Iface => self.error(DiagKind::InvalidInput),
            },

            State::AddrComponent => match event {
                Digit | HexDigit => self.token_len += 1,
                CloseBracket => {
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::PostAddr;
                    }
                }
                Whitespace => {
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::None;
                    }
                }
                V6Sep => {
                    if self.flags & flag::IPV4_EMBEDDING != 0 {
                        self.error(DiagKind::Ipv4IncorrectPosition);
                        return;
                    }
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::V6Separator;
                    }
                }
                V4Sep => {
                    if self.flags & flag::IPV4_EMBEDDING == 0 {
                        if self.components >= 7 {
                            self.error(DiagKind::Ipv4RequiredBits);
                            return;
                        }
                        self.v4_embedding = self.components;
                        self.flags |= flag::IPV4_EMBEDDING;
                        self.components += 2;
                    }
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::None;
                    }
                }
                Iface => {
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::Iface;
                    }
                }
                Cidr => {
                    self.commit_component();
                    if self.state != State::Error {
                        self.state = State::Cidr;
                        self.begin_token(1);
                    }
                }
                OpenBracket => self.error(DiagKind::InvalidInput),
            },

            State::V6Separator => match event {
                V6Sep => {
                    if self.flags & flag::ZERORUN != 0 {
                        self.error(DiagKind::InvalidAbbrev);
                        return;
                    }
                    self.zerorun = self.components;
                    self.flags |= flag::ZERORUN;
                    self.state = State::None;
                }
                Whitespace => self.state = State::None,
                Digit | HexDigit => {
                    self.state = State::AddrComponent;
                    self.begin_token(0);
                    self.token_len += 1;
                }
                Iface => self.state = State::Iface,
                Cidr => {
                    self.state = State::Cidr;
                    self.begin_token(1);
                }
                V4Sep | OpenBracket | CloseBracket => self.error(DiagKind::InvalidInput),
            },

            State::Cidr => match event {
                Digit => self.token_len += 1,
                CloseBracket => {
                    self.commit_cidr();
                    if self.state != State::Error {
                        self.state = State::PostAddr;
                    }
                }
                Whitespace => {
                    self.commit_cidr();
                    if self.state != State::Error {
                        self.state = State::None;
                    }
                }
                Iface => {
                    self.commit_cidr();
                    if self.state != State::Error {
                        self.state = State::Iface;
                    }
                }
                Cidr | HexDigit | V6Sep | V4Sep | OpenBracket => self.error(DiagKind::InvalidInput),
            },

            State::Iface => match event {
                Whitespace => self.state = State::None,
                CloseBracket => self.state = State::PostAddr,
                //Any other already-classified byte is accepted into the zone
                //verbatim; see the note on the zone alphabet in the crate docs.
                Digit | HexDigit | V6Sep | V4Sep | Cidr | Iface | OpenBracket => {
                    self.push_zone_byte()
                }
            },

            State::PostAddr => match event {
                Whitespace => {}
                V6Sep => {
                    self.state = State::Port;
                    self.begin_token(1);
                }
                _ => self.error(DiagKind::InvalidInput),
            },

            State::Port => match event {
                Digit => self.token_len += 1,
                Whitespace => {
                    self.commit_port();
                    if self.state != State::Error {
                        self.state = State::None;
                    }
                }
                _ => self.error(DiagKind::InvalidInput),
            },
        }
    }

    fn run(&mut self) -> bool {
        while self.position < self.input.len() {
            let byte = self.input[self.position];
            match classify(byte) {
                Some(EventClass::OpenBracket) => {
                    self.brackets += 1;
                    self.dispatch(EventClass::OpenBracket);
                }
                Some(event) => self.dispatch(event),
                None => self.error(DiagKind::InvalidInputChar),
            }
            if self.state == State::Error {
                return false;
            }
            self.position += 1;
        }

        //Treat end of input as whitespace so terminal commits happen uniformly.
        self.dispatch(EventClass::Whitespace);

        if self.flags & flag::IPV4_EMBEDDING != 0 {
            if self.v4_octets != 4 {
                self.error(DiagKind::InvalidIpv4Embedding);
            } else {
                self.out.flags.insert(Flags::IPV4_EMBED);
            }
        }

        if self.state == State::Error {
            return false;
        }

        let has_zerorun = self.flags & flag::ZERORUN != 0;
        match crate::zerorun::expand(&mut self.out.components, has_zerorun, self.zerorun, self.components) {
            Ok(()) => true,
            Err(kind) => {
                self.error(kind);
                false
            }
        }
    }
}

///Runs the state machine over `input`, writing into `out` and invoking `diag`
///at most once on failure. `out` is zeroed on entry regardless of outcome.
pub(crate) fn parse<'i, F>(input: &'i [u8], out: &mut Address, mut diag: F) -> bool
where
    F: FnMut(DiagEvent<'i>),
{
    *out = Address::default();

    if input.is_empty() {
        diag(DiagEvent::new(DiagKind::InvalidInput, input, 0));
        return false;
    }
    if input.len() > crate::MAX_INPUT_LEN {
        diag(DiagEvent::new(DiagKind::StringSizeExceeded, input, 0));
        return false;
    }

    let mut parser = Parser {
        state: State::None,
        input,
        position: 0,
        token_position: 0,
        token_len: 0,
        components: 0,
        brackets: 0,
        zerorun: 0,
        v4_embedding: 0,
        v4_octets: 0,
        flags: 0,
        out,
        diag,
        errored: false,
    };
    parser.run()
}
