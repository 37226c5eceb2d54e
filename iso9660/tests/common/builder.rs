//! Minimal ISO9660 image builder
//!
//! Layout: optional extra descriptors from sector 16, then the primary,
//! the terminator, the root directory, file data in insertion order, and
//! finally any subdirectories.

use crate::common::MemoryBlockDevice;
use iso9660::utils::datetime::RecordingTimestamp;
use iso9660::{DirectoryRecord, Extent, FileFlags};

pub const SECTOR: usize = 2048;

enum Entry {
    File { name: String, parts: Vec<Vec<u8>> },
    Dir(usize),
}

struct Dir {
    name: String,
    parent: usize,
    entries: Vec<Entry>,
}

pub struct IsoBuilder {
    volume_id: String,
    recorded: RecordingTimestamp,
    extra_descriptors: Vec<u8>,
    dirs: Vec<Dir>,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            volume_id: "TESTVOL".to_string(),
            recorded: RecordingTimestamp::default(),
            extra_descriptors: Vec::new(),
            dirs: vec![Dir {
                name: String::new(),
                parent: 0,
                entries: Vec::new(),
            }],
        }
    }

    pub fn volume_id(&mut self, id: &str) {
        self.volume_id = id.to_string();
    }

    /// Recording time stamped on every directory record
    pub fn recorded(&mut self, timestamp: RecordingTimestamp) {
        self.recorded = timestamp;
    }

    /// Emit a descriptor of `type_code` ahead of the primary
    pub fn descriptor_before_primary(&mut self, type_code: u8) {
        self.extra_descriptors.push(type_code);
    }

    pub fn add_dir(&mut self, path: &str) {
        let (parent, name) = self.split(path);
        let index = self.dirs.len();
        self.dirs.push(Dir {
            name: name.to_string(),
            parent,
            entries: Vec::new(),
        });
        self.dirs[parent].entries.push(Entry::Dir(index));
    }

    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        self.add_multi_extent_file(path, &[content]);
    }

    /// File stored as one record per part, all but the last flagged not-final
    pub fn add_multi_extent_file(&mut self, path: &str, parts: &[&[u8]]) {
        let (parent, name) = self.split(path);
        self.dirs[parent].entries.push(Entry::File {
            name: name.to_string(),
            parts: parts.iter().map(|p| p.to_vec()).collect(),
        });
    }

    pub fn build_device(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.build())
    }

    pub fn build(&self) -> Vec<u8> {
        let pvd_sector = 16 + self.extra_descriptors.len();
        let root_lba = (pvd_sector + 2) as u32;

        // directory sizes, then sector allocation
        let dir_sectors: Vec<u32> = (0..self.dirs.len())
            .map(|i| packed_sectors(&self.record_lengths(i)))
            .collect();
        let mut dir_lbas = vec![0u32; self.dirs.len()];
        let mut part_extents: Vec<Vec<Vec<Extent>>> = Vec::new();

        let mut next = root_lba;
        dir_lbas[0] = next;
        next += dir_sectors[0];
        for dir in &self.dirs {
            let mut per_entry = Vec::new();
            for entry in &dir.entries {
                let mut extents = Vec::new();
                if let Entry::File { parts, .. } = entry {
                    for part in parts {
                        extents.push(Extent::new(next, part.len() as u32));
                        next += part.len().div_ceil(SECTOR) as u32;
                    }
                }
                per_entry.push(extents);
            }
            part_extents.push(per_entry);
        }
        for i in 1..self.dirs.len() {
            dir_lbas[i] = next;
            next += dir_sectors[i];
        }
        let dir_extent = |i: usize| Extent::new(dir_lbas[i], dir_sectors[i] * SECTOR as u32);

        let mut data = vec![0u8; next as usize * SECTOR];

        for (i, code) in self.extra_descriptors.iter().enumerate() {
            header(&mut data, 16 + i, *code);
        }
        self.write_primary(&mut data, pvd_sector, dir_extent(0), next);
        header(&mut data, pvd_sector + 1, 255);

        for (i, dir) in self.dirs.iter().enumerate() {
            let mut records = vec![
                self.record(&[0], dir_extent(i), FileFlags::dir()),
                self.record(&[1], dir_extent(dir.parent), FileFlags::dir()),
            ];
            for (e, entry) in dir.entries.iter().enumerate() {
                match entry {
                    Entry::File { name, parts } => {
                        let extents = &part_extents[i][e];
                        for (p, part) in parts.iter().enumerate() {
                            let flags = if p + 1 < extents.len() {
                                FileFlags::continued()
                            } else {
                                FileFlags::default()
                            };
                            records.push(self.record(name.as_bytes(), extents[p], flags));
                            let at = extents[p].location as usize * SECTOR;
                            data[at..at + part.len()].copy_from_slice(part);
                        }
                    }
                    Entry::Dir(sub) => {
                        records.push(self.record(
                            self.dirs[*sub].name.as_bytes(),
                            dir_extent(*sub),
                            FileFlags::dir(),
                        ));
                    }
                }
            }
            write_packed(&mut data, dir_lbas[i] as usize * SECTOR, &records);
        }

        data
    }

    fn split<'a>(&self, path: &'a str) -> (usize, &'a str) {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let name = parts.pop().expect("non-empty path");
        let mut dir = 0;
        for component in parts {
            dir = self.dirs[dir]
                .entries
                .iter()
                .find_map(|entry| match entry {
                    Entry::Dir(sub) if self.dirs[*sub].name == component => Some(*sub),
                    _ => None,
                })
                .unwrap_or_else(|| panic!("no directory {component}"));
        }
        (dir, name)
    }

    fn record(&self, identifier: &[u8], extent: Extent, flags: FileFlags) -> Vec<u8> {
        let mut record = DirectoryRecord::new(identifier, extent, flags);
        record.recorded = self.recorded;
        record.encode().expect("encodable record")
    }

    fn record_lengths(&self, dir: usize) -> Vec<usize> {
        let mut lengths = vec![34, 34];
        for entry in &self.dirs[dir].entries {
            match entry {
                Entry::File { name, parts } => {
                    let len = self
                        .record(name.as_bytes(), Extent::new(0, 0), FileFlags::default())
                        .len();
                    lengths.extend(std::iter::repeat(len).take(parts.len()));
                }
                Entry::Dir(sub) => {
                    let name = self.dirs[*sub].name.as_bytes();
                    lengths.push(self.record(name, Extent::new(0, 0), FileFlags::dir()).len());
                }
            }
        }
        lengths
    }

    fn write_primary(&self, data: &mut [u8], sector: usize, root: Extent, total: u32) {
        header(data, sector, 1);
        let at = sector * SECTOR;
        let pvd = &mut data[at..at + SECTOR];
        pvd[8..40].fill(b' ');
        pvd[8..13].copy_from_slice(b"LINUX");
        pvd[40..72].fill(b' ');
        pvd[40..40 + self.volume_id.len()].copy_from_slice(self.volume_id.as_bytes());
        both_u32(&mut pvd[80..88], total);
        both_u16(&mut pvd[120..124], 1);
        both_u16(&mut pvd[124..128], 1);
        both_u16(&mut pvd[128..132], SECTOR as u16);
        let root_record = self.record(&[0], root, FileFlags::dir());
        pvd[156..190].copy_from_slice(&root_record);
        pvd[190..702].fill(b' ');
        pvd[318..327].copy_from_slice(b"PUBLISHER");
        pvd[574..585].copy_from_slice(b"ISOBUILDER1");
        pvd[813..830].copy_from_slice(b"2024031012300000\x08");
        pvd[830..846].fill(b'0');
        pvd[881] = 1;
    }
}

fn header(data: &mut [u8], sector: usize, code: u8) {
    let at = sector * SECTOR;
    data[at] = code;
    data[at + 1..at + 6].copy_from_slice(b"CD001");
    data[at + 6] = 1;
}

fn both_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

fn both_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}

/// Records never straddle a sector; the rest of a full sector stays zero
fn packed_sectors(lengths: &[usize]) -> u32 {
    let mut sectors = 1;
    let mut pos = 0;
    for &len in lengths {
        if pos + len > SECTOR {
            sectors += 1;
            pos = 0;
        }
        pos += len;
    }
    sectors
}

fn write_packed(data: &mut [u8], start: usize, records: &[Vec<u8>]) {
    let mut sector = 0;
    let mut pos = 0;
    for record in records {
        if pos + record.len() > SECTOR {
            sector += 1;
            pos = 0;
        }
        let at = start + sector * SECTOR + pos;
        data[at..at + record.len()].copy_from_slice(record);
        pos += record.len();
    }
}
