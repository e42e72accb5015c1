#![no_main]

use libfuzzer_sys::fuzz_target;

use tpsplot::table::{read_table_from, write_table_to};

fuzz_target!(|data: &[u8]| {
    // Whatever loads must write back and load to the same table
    if let Ok(table) = read_table_from(data) {
        let mut out = Vec::new();
        write_table_to(&table, &mut out).unwrap();
        assert_eq!(read_table_from(out.as_slice()).unwrap(), table);
    }
});
