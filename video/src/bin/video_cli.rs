use video_lib::mda::{Attrib, CrtReg, BLINK_ENABLE, COLUMNS, ROWS};
use video_lib::{Bus, MdaVideo};
use common::constants::MDA_MEM_START;

use std::io::{stdout, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::queue;
use crossterm::style::{style, Print, PrintStyledContent, ResetColor, Stylize};


/// Render a monochrome text screen image
#[derive(Parser)]
struct Args {
    /// Raw screen image of character/attribute byte pairs.
    image: Option<PathBuf>,

    /// Seed for the power-on contents of video memory.
    #[arg(long, default_value_t = MdaVideo::DEFAULT_SEED)]
    seed: u64,

    /// Let attribute bit 7 blink.
    #[arg(long)]
    blink: bool,

    /// Cell the cursor sits on.
    #[arg(long, default_value_t = 0)]
    cursor: u16,

    /// Keep the cursor switched off.
    #[arg(long)]
    hide_cursor: bool,
}

fn crt_out(bus: &Bus, reg: CrtReg, val: u8) {
    bus.io_out(MdaVideo::CRT_ADDR, reg as u8);
    bus.io_out(MdaVideo::CRT_DATA, val);
}

fn printable(ch: u8) -> char {
    if ch.is_ascii_graphic() {
        ch as char
    } else {
        ' '
    }
}

fn render(screen: &[(u8, Attrib)], cursor: Option<usize>) -> std::io::Result<()> {
    let mut out = stdout().lock();
    for (row, line) in screen.chunks(COLUMNS).enumerate() {
        for (col, &(ch, attrib)) in line.iter().enumerate() {
            let mut content = style(printable(ch));
            if attrib.contains(Attrib::UNDERLINE) || cursor == Some(row * COLUMNS + col) {
                content = content.underlined();
            }
            if attrib.contains(Attrib::HIGH_INTENSITY) {
                content = content.bold();
            }
            if attrib.contains(Attrib::BLINK) {
                content = content.slow_blink();
            }
            if attrib.contains(Attrib::INVERSE) {
                content = content.reverse();
            }
            queue!(out, PrintStyledContent(content))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    out.flush()
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let opt = Args::parse();

    let mda = Arc::new(Mutex::new(MdaVideo::with_seed(opt.seed)));
    let mut bus = Bus::new();
    bus.attach(mda.clone());
    bus.reset();

    if let Some(path) = &opt.image {
        let buf = std::fs::read(path)?;
        for (addr, byte) in (MDA_MEM_START..).zip(buf.iter().take(COLUMNS * ROWS * 2)) {
            bus.mem_write(addr, *byte);
        }
    }

    if opt.blink {
        bus.io_out(MdaVideo::MODE_CTRL, BLINK_ENABLE);
    }
    crt_out(&bus, CrtReg::CursorStart, if opt.hide_cursor { 0 } else { 0x20 });
    crt_out(&bus, CrtReg::CursorAddrHigh, (opt.cursor >> 8) as u8);
    crt_out(&bus, CrtReg::CursorAddrLow, opt.cursor as u8);

    let mut screen = vec![(b' ', Attrib::empty()); COLUMNS * ROWS];
    let mut cursor = None;
    mda.lock().unwrap().traverse(|cell, ch, attrib, cur| {
        if let Some(slot) = screen.get_mut(cell) {
            *slot = (ch, attrib);
        }
        cursor = cur;
        Ok::<(), std::io::Error>(())
    })?;

    render(&screen, cursor)
}
