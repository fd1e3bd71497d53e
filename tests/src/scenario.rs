use crate::helpers::*;

use video_lib::mda::{Attrib, CrtReg, MdaVideo, BLINK_ENABLE, NUM_CELLS};
use video_lib::module::{create, Frontend};
use video_lib::{Bus, Peripheral};

use std::sync::{Arc, Mutex};

#[test]
fn hello() {
    let mut mda = MdaVideo::new();
    mda.reset();
    mda.write(BASE, b'A');
    mda.write(BASE + 1, 0x07);

    let delivered = collect(&mut mda);
    assert_eq!(delivered.len(), NUM_CELLS);
    assert_eq!(delivered[0], (0, b'A', Attrib::empty(), Some(0)));

    assert!(collect(&mut mda).is_empty());
}

#[derive(Default)]
struct Screen {
    adapter: Option<Arc<Mutex<MdaVideo>>>,
    text: Vec<u8>,
}

impl Frontend for Screen {
    fn set_video_adapter(&mut self, adapter: Arc<Mutex<MdaVideo>>) {
        self.adapter = Some(adapter);
    }
}

impl Screen {
    fn refresh(&mut self) -> usize {
        let adapter = self.adapter.as_ref().unwrap();
        let text = &mut self.text;
        text.resize(NUM_CELLS, b' ');
        let mut count = 0;
        adapter.lock().unwrap().traverse(|cell, ch, _, _| {
            text[cell] = ch;
            count += 1;
            Ok::<(), ()>(())
        }).unwrap();
        count
    }

    fn row(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.text[row * 80..(row + 1) * 80]).trim_end().to_owned()
    }
}

// Program an adapter the way a BIOS and a text mode program would, going
// through the bus only.
#[test]
fn guest_session() {
    let mut screen = Screen::default();
    let dev = create("mda", Some(&mut screen), "seed=3").unwrap();

    let mut bus = Bus::new();
    bus.attach(dev);
    bus.reset();

    // Clear screen.
    for cell in 0..80 * 25 {
        bus.mem_write(BASE + cell * 2, b' ');
        bus.mem_write(BASE + cell * 2 + 1, 0x07);
    }
    assert_eq!(screen.refresh(), NUM_CELLS);

    for (i, ch) in b"C:\\>dir".iter().enumerate() {
        bus.mem_write(BASE + 160 + i as u32 * 2, *ch);
    }
    assert_eq!(screen.refresh(), 7);
    assert_eq!(screen.row(1), "C:\\>dir");
    assert_eq!(screen.row(0), "");

    // Wait for retrace, then move the cursor to the end of the line.
    let status = bus.io_in(MdaVideo::STATUS);
    while bus.io_in(MdaVideo::STATUS) == status {}
    bus.io_out(MdaVideo::CRT_ADDR, CrtReg::CursorAddrHigh as u8);
    bus.io_out(MdaVideo::CRT_DATA, 0);
    bus.io_out(MdaVideo::CRT_ADDR, CrtReg::CursorAddrLow as u8);
    bus.io_out(MdaVideo::CRT_DATA, 87);

    let adapter = screen.adapter.clone().unwrap();
    assert_eq!(adapter.lock().unwrap().state().cursor_offset(), 87);
    assert!(adapter.lock().unwrap().state().is_cell_dirty(0));
    assert!(adapter.lock().unwrap().state().is_cell_dirty(87));

    bus.io_out(MdaVideo::MODE_CTRL, BLINK_ENABLE);
    assert_eq!(screen.refresh(), NUM_CELLS);
    assert_eq!(screen.refresh(), 0);
    assert_eq!(adapter.lock().unwrap().read(BASE + 161), 0x07);
}
