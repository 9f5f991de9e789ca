//! CLI subcommands and their printable results.

use std::fmt;
use std::str::FromStr;

use clap::Subcommand;
use thiserror::Error;
use vnhash::{Distribution, HashAlgorithm, HashRing, RingConfig};

/// A node given on the command line as `NAME` or `NAME=REPLICAS`.
///
/// The text after the last `=` is read as a replica count only when it is a
/// number, so names such as `zone=east` are kept whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    /// Node identifier placed on the ring.
    pub name: String,
    /// Replica count for this node; the ring's count when absent.
    pub replicas: Option<usize>,
}

/// Rejected `--node` values.
#[derive(Debug, Error)]
pub enum NodeSpecError {
    #[error("node name is empty")]
    EmptyName,
}

impl FromStr for NodeSpec {
    type Err = NodeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, replicas) = s
            .rsplit_once('=')
            .and_then(|(name, replicas)| Some((name, Some(replicas.parse::<usize>().ok()?))))
            .unwrap_or((s, None));

        if name.is_empty() {
            return Err(NodeSpecError::EmptyName);
        }
        Ok(NodeSpec {
            name: name.to_string(),
            replicas,
        })
    }
}

/// Subcommands of the `vnhash` tool.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the node that owns each key
    Route {
        /// Ring member, optionally with its own replica count
        #[arg(long = "node", value_name = "NAME[=REPLICAS]")]
        nodes: Vec<NodeSpec>,

        /// Keys to route
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Route generated keys and report how evenly they spread
    Distribution {
        /// Ring member, optionally with its own replica count
        #[arg(long = "node", value_name = "NAME[=REPLICAS]")]
        nodes: Vec<NodeSpec>,

        /// Number of generated members when no --node is given
        #[arg(long = "nodes", default_value_t = 20)]
        generated: usize,

        /// Number of generated keys
        #[arg(long, default_value_t = 1000)]
        keys: usize,
    },
}

/// Output of a command, printed through its `Display` impl.
#[derive(Debug)]
pub enum CommandResult {
    /// Each key with its owner, `None` on an empty ring.
    Routes(Vec<(String, Option<String>)>),
    /// Key spread over the ring's nodes.
    Distribution {
        hasher: HashAlgorithm,
        replicas: usize,
        report: Distribution,
    },
}

impl Command {
    /// Builds a ring from `config` and the command's nodes, then runs the command.
    pub fn execute(&self, config: &RingConfig) -> CommandResult {
        match self {
            Command::Route { nodes, keys } => {
                let ring = build_ring(config, nodes.iter().cloned());
                let routes = keys.iter().map(|key| (key.clone(), ring.get(key))).collect();
                CommandResult::Routes(routes)
            }
            Command::Distribution {
                nodes,
                generated,
                keys,
            } => {
                let ring = if nodes.is_empty() {
                    build_ring(
                        config,
                        (0..*generated).map(|i| NodeSpec {
                            name: format!("node-{i}"),
                            replicas: None,
                        }),
                    )
                } else {
                    build_ring(config, nodes.iter().cloned())
                };

                let report = Distribution::measure(&ring, (0..*keys).map(|i| format!("key:{i}")));
                CommandResult::Distribution {
                    hasher: config.hasher,
                    replicas: ring.replicas(),
                    report,
                }
            }
        }
    }
}

fn build_ring(config: &RingConfig, nodes: impl IntoIterator<Item = NodeSpec>) -> HashRing<HashAlgorithm> {
    let ring = config.build();
    for node in nodes {
        match node.replicas {
            Some(replicas) => ring.add_with_replicas(&node.name, replicas),
            None => ring.add(&node.name),
        }
    }
    ring
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Routes(routes) => {
                for (key, node) in routes {
                    writeln!(f, "{key} -> {}", node.as_deref().unwrap_or("<none>"))?;
                }
                Ok(())
            }
            CommandResult::Distribution {
                hasher,
                replicas,
                report,
            } => {
                let total = report.total();
                writeln!(f, "hasher: {hasher}, replicas: {replicas}, keys: {total}")?;
                for (node, count) in report.counts() {
                    let share = 100.0 * *count as f64 / total.max(1) as f64;
                    writeln!(f, "{node}\t{count}\t{share:.2}%")?;
                }
                if report.misses() > 0 {
                    writeln!(f, "misses: {}", report.misses())?;
                }
                writeln!(f, "entropy: {:.4}", report.entropy())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliConfig;
    use clap::Parser;

    fn run(args: &[&str]) -> String {
        let cli = CliConfig::try_parse_from(std::iter::once("vnhash").chain(args.iter().copied())).unwrap();
        let config = cli.ring_config().unwrap();
        cli.command.execute(&config).to_string()
    }

    #[test]
    fn test_node_spec_parsing() {
        assert_eq!(
            "cache-1".parse::<NodeSpec>().unwrap(),
            NodeSpec { name: "cache-1".into(), replicas: None }
        );
        assert_eq!(
            "10.0.0.1:11211=150".parse::<NodeSpec>().unwrap(),
            NodeSpec { name: "10.0.0.1:11211".into(), replicas: Some(150) }
        );
        assert!(matches!("=5".parse::<NodeSpec>(), Err(NodeSpecError::EmptyName)));
        assert!(matches!("".parse::<NodeSpec>(), Err(NodeSpecError::EmptyName)));
    }

    #[test]
    fn test_node_spec_keeps_equals_in_name() {
        assert_eq!(
            "zone=east".parse::<NodeSpec>().unwrap(),
            NodeSpec { name: "zone=east".into(), replicas: None }
        );
        assert_eq!(
            "zone=east=120".parse::<NodeSpec>().unwrap(),
            NodeSpec { name: "zone=east".into(), replicas: Some(120) }
        );
        assert_eq!(
            "a=".parse::<NodeSpec>().unwrap(),
            NodeSpec { name: "a=".into(), replicas: None }
        );
    }

    #[test]
    fn test_route_single_node() {
        let output = run(&["route", "--node", "solo", "k1", "k2"]);
        assert_eq!(output, "k1 -> solo\nk2 -> solo\n");
    }

    #[test]
    fn test_route_empty_ring() {
        let output = run(&["route", "k1"]);
        assert_eq!(output, "k1 -> <none>\n");
    }

    #[test]
    fn test_route_matches_library() {
        let output = run(&["route", "--node", "a", "--node", "b=120", "--hasher", "sip13", "user:1"]);

        let ring = HashRing::with_hasher(100, HashAlgorithm::Sip13);
        ring.add("a");
        ring.add_with_replicas("b", 120);
        let expected = ring.get("user:1").unwrap();
        assert_eq!(output, format!("user:1 -> {expected}\n"));
    }

    #[test]
    fn test_distribution_report() {
        let output = run(&["distribution", "--nodes", "4", "--keys", "400"]);

        assert!(output.starts_with("hasher: xxh3, replicas: 100, keys: 400\n"), "{output}");
        assert!(output.contains("node-0\t"), "{output}");
        assert!(output.contains("node-3\t"), "{output}");
        assert!(!output.contains("misses"), "{output}");
        assert!(output.trim_end().lines().last().unwrap().starts_with("entropy: "), "{output}");
    }

    #[test]
    fn test_distribution_flags_skewed_ring() {
        let output = run(&["--hasher", "fnv1", "distribution", "--nodes", "20", "--keys", "1000"]);

        let idle = output.lines().filter(|line| line.contains("\t0\t0.00%")).count();
        assert!(idle > 0, "{output}");
        let entropy: f64 = output
            .lines()
            .find_map(|line| line.strip_prefix("entropy: "))
            .unwrap()
            .parse()
            .unwrap();
        assert!(entropy < 0.5, "{output}");
    }

    #[test]
    fn test_distribution_with_explicit_nodes() {
        let output = run(&["distribution", "--node", "x", "--keys", "10"]);
        assert!(output.contains("x\t10\t100.00%"), "{output}");
        assert!(output.contains("entropy: 1.0000"), "{output}");
    }
}
