use rust_htslib::bam::record::{Aux, Record};
use spliced_bam2gff_rs::transcript::keep_record;

const UNMAPPED: u16 = 0x4;
const SECONDARY: u16 = 0x100;
const SUPPLEMENTARY: u16 = 0x800;

#[test]
fn mapped_primary_records_are_kept() {
    let record = Record::new();
    assert!(keep_record(&record, false));
    assert!(keep_record(&record, true));
}

#[test]
fn unmapped_records_are_always_dropped() {
    let mut record = Record::new();
    record.set_flags(UNMAPPED);
    assert!(!keep_record(&record, false));
    assert!(!keep_record(&record, true));
}

#[test]
fn secondary_and_supplementary_are_dropped_by_default() {
    let mut record = Record::new();
    record.set_flags(SECONDARY);
    assert!(!keep_record(&record, false));
    assert!(keep_record(&record, true));

    record.set_flags(SUPPLEMENTARY);
    assert!(!keep_record(&record, false));
    assert!(keep_record(&record, true));
}

#[test]
fn split_reads_are_dropped_by_default() {
    let mut record = Record::new();
    record
        .push_aux(b"SA", Aux::String("chr9,1000,+,50M,60,0;"))
        .unwrap();
    assert!(!keep_record(&record, false));
    assert!(keep_record(&record, true));
}
