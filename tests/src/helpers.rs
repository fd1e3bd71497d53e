
use video_lib::mda::{Attrib, CrtReg, MdaVideo};
use video_lib::Peripheral;
use common::constants::MDA_MEM_START;

pub const BASE: u32 = MDA_MEM_START;

pub type Delivered = Vec<(usize, u8, Attrib, Option<usize>)>;

// A freshly reset adapter with the initial full redraw already consumed.
pub fn clean_mda() -> MdaVideo {
    let mut mda = MdaVideo::new();
    mda.reset();
    collect(&mut mda);
    mda
}

pub fn collect(mda: &mut MdaVideo) -> Delivered {
    let mut out = Vec::new();
    mda.traverse(|cell, ch, attrib, cursor| {
        out.push((cell, ch, attrib, cursor));
        Ok::<(), ()>(())
    }).unwrap();
    out
}

pub fn delivered_cells(mda: &mut MdaVideo) -> Vec<usize> {
    collect(mda).into_iter().map(|(cell, ..)| cell).collect()
}

pub fn crt_out(mda: &mut MdaVideo, reg: CrtReg, val: u8) {
    mda.io_out(MdaVideo::CRT_ADDR, reg as u8);
    mda.io_out(MdaVideo::CRT_DATA, val);
}

pub fn put_cell(mda: &mut MdaVideo, cell: usize, ch: u8, attr: u8) {
    let addr = BASE + (cell as u32) * 2;
    mda.write(addr, ch);
    mda.write(addr + 1, attr);
}
