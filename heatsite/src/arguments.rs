use std::io::Write;

use heatargs::{Arg, Arguments};

use crate::error::Result;

/// Settings for distilling a site directory into a WiX fragment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    pub component_group_name: String,
    pub output_path: String,
    pub root: String,
    pub site_directory: String,
    pub source: String,
    pub dont_overwrite_configs: bool,
}

impl Arguments for SiteOptions {
    fn arguments() -> Vec<Arg<Self>> {
        vec![
            Arg::new("ComponentGroupName", |o: &mut SiteOptions, v: String| {
                o.component_group_name = v
            })
            .short("comp")
            .default_value("site.content")
            .help("The component group name given to the fragments"),
            Arg::new("OutputPath", |o: &mut SiteOptions, v: String| o.output_path = v)
                .short("out")
                .default_value("HeatSiteOutput.wxs")
                .help("The destination file where the wix fragments will be written"),
            Arg::new("Root", |o: &mut SiteOptions, v: String| o.root = v)
                .short("root")
                .required()
                .help("The root directory of the site project"),
            Arg::new("SiteDirectory", |o: &mut SiteOptions, v: String| {
                o.site_directory = v
            })
            .short("siteDir")
            .default_value("site")
            .help("The directory declared in the wix file that these files will be within"),
            Arg::new("Source", |o: &mut SiteOptions, v: String| o.source = v)
                .short("src")
                .required()
                .help(
                    "The root path appended to the paths in the fragments, normally this \
                     would be a relative path from the installer project to the source \
                     files i.e. ..\\..\\WebApplication\\",
                ),
            Arg::new(
                "DontOverwriteFilesWithConfigExtension",
                |o: &mut SiteOptions, v: bool| o.dont_overwrite_configs = v,
            )
            .short("dontOverwriteConfigs")
            .help("If true then .config files will be marked as don't overwrite"),
        ]
    }
}

impl SiteOptions {
    /// Write the resolved settings, one per line.
    pub fn report<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Component group: {}", self.component_group_name)?;
        writeln!(out, "Output path:     {}", self.output_path)?;
        writeln!(out, "Root:            {}", self.root)?;
        writeln!(out, "Site directory:  {}", self.site_directory)?;
        writeln!(out, "Source:          {}", self.source)?;
        writeln!(
            out,
            "Config files:    {}",
            if self.dont_overwrite_configs {
                "never overwritten"
            } else {
                "overwritten"
            }
        )?;
        Ok(())
    }
}
