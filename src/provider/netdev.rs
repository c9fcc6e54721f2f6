//! Linux interface counters via `/proc/net/dev`.

use super::{ProviderError, StatsProvider};
use crate::counters::CounterSet;
use crate::filter::DeviceFilter;
use std::collections::HashMap;
use std::path::PathBuf;

const PROC_NET_DEV: &str = "/proc/net/dev";

/// Column offsets within a `/proc/net/dev` row, counted after the
/// interface name. The kernel table carries 8 receive and 8 transmit
/// counters; only the byte totals survive the adaptation into the fixed
/// counter set.
const RECEIVE_BYTES_COLUMN: usize = 0;
const TRANSMIT_BYTES_COLUMN: usize = 8;
const COLUMN_COUNT: usize = 16;

/// Reads the kernel's per-interface counter table and reduces each row to
/// the fixed counter set, excluding devices the filter puts out of scope.
#[derive(Debug, Clone)]
pub struct NetDevProvider {
    filter: DeviceFilter,
    path: PathBuf,
}

impl NetDevProvider {
    pub fn new(filter: DeviceFilter) -> Self {
        Self {
            filter,
            path: PathBuf::from(PROC_NET_DEV),
        }
    }

    /// Read from an alternate table file instead of `/proc/net/dev`.
    pub fn with_path(filter: DeviceFilter, path: impl Into<PathBuf>) -> Self {
        Self {
            filter,
            path: path.into(),
        }
    }
}

impl StatsProvider for NetDevProvider {
    fn fetch(&self) -> Result<HashMap<String, CounterSet>, ProviderError> {
        let content = std::fs::read_to_string(&self.path)?;
        parse_net_dev(&content, &self.filter)
    }
}

/// Parse the `/proc/net/dev` table.
///
/// The first two lines are headers. Each remaining line is
/// `"  eth0: <16 whitespace-separated counters>"`.
fn parse_net_dev(
    content: &str,
    filter: &DeviceFilter,
) -> Result<HashMap<String, CounterSet>, ProviderError> {
    let mut stats = HashMap::new();

    for line in content.lines().skip(2) {
        if line.trim().is_empty() {
            continue;
        }
        let (name, rest) = line.split_once(':').ok_or_else(|| ProviderError::Parse {
            device: line.trim().to_string(),
            reason: "missing interface separator".to_string(),
        })?;
        let name = name.trim();

        if filter.ignored(name) {
            continue;
        }

        let fields: Vec<&str> = rest.split_whitespace().collect();
        if fields.len() < COLUMN_COUNT {
            return Err(ProviderError::Parse {
                device: name.to_string(),
                reason: format!("expected {} counters, found {}", COLUMN_COUNT, fields.len()),
            });
        }

        let column = |idx: usize| -> Result<u64, ProviderError> {
            fields[idx].parse().map_err(|_| ProviderError::Parse {
                device: name.to_string(),
                reason: format!("counter column {} is not numeric: {:?}", idx, fields[idx]),
            })
        };

        stats.insert(
            name.to_string(),
            [column(RECEIVE_BYTES_COLUMN)?, column(TRANSMIT_BYTES_COLUMN)?],
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1738262   12033    0    0    0     0          0         0  1738262   12033    0    0    0     0       0          0
  eth0: 19305901433 14000000    0    0    0     0          0         0 9003338538 8000000    0    0    0     0       0          0
";

    #[test]
    fn test_parses_byte_totals_per_interface() {
        let filter = DeviceFilter::new(None, None).unwrap();
        let stats = parse_net_dev(SAMPLE, &filter).unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats["lo"], [1_738_262, 1_738_262]);
        assert_eq!(stats["eth0"], [19_305_901_433, 9_003_338_538]);
    }

    #[test]
    fn test_filter_excludes_out_of_scope_devices() {
        let filter = DeviceFilter::new(Some("^lo$"), None).unwrap();
        let stats = parse_net_dev(SAMPLE, &filter).unwrap();

        assert!(!stats.contains_key("lo"));
        assert!(stats.contains_key("eth0"));
    }

    #[test]
    fn test_malformed_row_fails_the_whole_fetch() {
        let content = "h1\nh2\n  eth0: 1 2 3\n";
        let filter = DeviceFilter::new(None, None).unwrap();
        let err = parse_net_dev(content, &filter).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn test_non_numeric_counter_fails_the_whole_fetch() {
        let content = "h1\nh2\n  eth0: x 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n";
        let filter = DeviceFilter::new(None, None).unwrap();
        assert!(parse_net_dev(content, &filter).is_err());
    }

    #[test]
    fn test_fetch_unreachable_source_is_io_error() {
        let filter = DeviceFilter::new(None, None).unwrap();
        let provider = NetDevProvider::with_path(filter, "/nonexistent/net/dev");
        assert!(matches!(provider.fetch(), Err(ProviderError::Io(_))));
    }
}
